mod counting;
pub mod radix;

pub use {
    counting::counting_sort_by_key,
    radix::{radix_sort, radix_sort_by_key, radix_sort_with, OrderedKey},
};

#[cfg(feature = "parallel")]
pub use radix::par_radix_sort_by_key;
