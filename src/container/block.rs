//! Block attributes shared by the container serializer.

/// A block content ID, addressing one external data series.
pub(crate) type ContentId = i32;

/// The compression method byte of a block.
///
/// Method 3 (LZMA) is defined by the format but never chosen by this writer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CompressionMethod {
    None,
    Gzip,
    Bzip2,
    Rans4x8,
}

impl From<CompressionMethod> for u8 {
    fn from(compression_method: CompressionMethod) -> Self {
        match compression_method {
            CompressionMethod::None => 0,
            CompressionMethod::Gzip => 1,
            CompressionMethod::Bzip2 => 2,
            CompressionMethod::Rans4x8 => 4,
        }
    }
}

/// The content type byte of a block.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ContentType {
    CompressionHeader,
    SliceHeader,
    ExternalData,
    CoreData,
}

impl From<ContentType> for u8 {
    fn from(content_type: ContentType) -> Self {
        match content_type {
            ContentType::CompressionHeader => 1,
            ContentType::SliceHeader => 2,
            ContentType::ExternalData => 4,
            ContentType::CoreData => 5,
        }
    }
}
