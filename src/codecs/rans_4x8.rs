//! rANS 4x8 codec.

mod encode;

pub(crate) use self::encode::encode;

/// The rANS 4x8 frequency model order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Order {
    /// Order-0: one frequency table for the whole stream.
    Zero,
    /// Order-1: a frequency table per preceding byte.
    One,
}

impl From<Order> for u8 {
    fn from(order: Order) -> Self {
        match order {
            Order::Zero => 0,
            Order::One => 1,
        }
    }
}
