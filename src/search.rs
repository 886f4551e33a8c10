pub mod bitap;

pub use bitap::{Bitap, ByteBitap, ByteMasks, MaskTable, Matches, SparseMasks};
