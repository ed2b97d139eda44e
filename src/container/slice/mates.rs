//! Mate resolution within a slice.

use std::{cmp, collections::HashMap};

use bstr::BString;

use crate::record::{Flags, Record};

/// Links mate pairs within a slice and detaches every record whose mate
/// information cannot be reconstructed from the chain.
///
/// Detached records store their mate reference sequence ID, mate alignment
/// start, mate flags, and template length explicitly. A linked pair stores a
/// slice-local distance on the upstream record instead.
///
/// For non-coordinate-sorted input, linking is skipped and every record is
/// written detached.
pub(crate) fn resolve(records: &mut [Record], coordinate_sorted: bool) {
    for record in records.iter_mut() {
        record.cram_flags.insert(Flags::IS_DETACHED);
        record.next_segment_index = None;
        record.previous_segment_index = None;
    }

    if !coordinate_sorted {
        return;
    }

    let mut primary: HashMap<BString, usize> = HashMap::new();
    let mut secondary: HashMap<BString, usize> = HashMap::new();

    for i in 0..records.len() {
        let flags = records[i].bam_flags;

        if !flags.is_segmented() {
            continue;
        }

        let Some(name) = records[i].name.clone() else {
            continue;
        };

        let map = if flags.is_secondary() || flags.is_supplementary() {
            &mut secondary
        } else {
            &mut primary
        };

        if let Some(j) = map.insert(name, i) {
            records[j].next_segment_index = Some(i);
            records[i].previous_segment_index = Some(j);
        }
    }

    for i in 0..records.len() {
        let Some(j) = records[i].next_segment_index else {
            continue;
        };

        // Only clean two-segment templates are eligible: a middle fragment of
        // a longer chain stays detached.
        if records[i].previous_segment_index.is_some() || records[j].next_segment_index.is_some() {
            continue;
        }

        if mate_info_is_reconstructible(&records[i], &records[j]) {
            records[i].cram_flags.remove(Flags::IS_DETACHED);
            records[i].cram_flags.insert(Flags::MATE_IS_DOWNSTREAM);
            records[i].mate_distance = Some(j - i - 1);
            records[j].cram_flags.remove(Flags::IS_DETACHED);
        }
    }
}

/// Returns whether the pair's mate fields can be rederived purely from the
/// pair relationship.
fn mate_info_is_reconstructible(a: &Record, b: &Record) -> bool {
    if a.mate_reference_sequence_id != b.reference_sequence_id
        || b.mate_reference_sequence_id != a.reference_sequence_id
    {
        return false;
    }

    if a.mate_alignment_start != b.alignment_start || b.mate_alignment_start != a.alignment_start {
        return false;
    }

    if a.bam_flags.is_mate_reverse_complemented() != b.bam_flags.is_reverse_complemented()
        || b.bam_flags.is_mate_reverse_complemented() != a.bam_flags.is_reverse_complemented()
        || a.bam_flags.is_mate_unmapped() != b.bam_flags.is_unmapped()
        || b.bam_flags.is_mate_unmapped() != a.bam_flags.is_unmapped()
    {
        return false;
    }

    if a.bam_flags.is_unmapped() || b.bam_flags.is_unmapped() {
        return false;
    }

    let (Some(a_start), Some(a_end), Some(b_start), Some(b_end)) = (
        a.alignment_start,
        a.alignment_end(),
        b.alignment_start,
        b.alignment_end(),
    ) else {
        return false;
    };

    let leftmost = usize::from(cmp::min(a_start, b_start));
    let rightmost = usize::from(cmp::max(a_end, b_end));

    let Ok(span) = i32::try_from(rightmost - leftmost + 1) else {
        return false;
    };

    if a_start < b_start {
        a.template_length == span && b.template_length == -span
    } else if b_start < a_start {
        a.template_length == -span && b.template_length == span
    } else {
        (a.template_length == span && b.template_length == -span)
            || (a.template_length == -span && b.template_length == span)
    }
}
