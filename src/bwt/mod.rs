//! The bwt module implements the Burrows-Wheeler Transform, the sorting
//! heart of the compressor.
//!
//! The forward transform prepends a sentinel byte, sorts every cyclic
//! rotation of the block, and emits the last column of the sorted rotation
//! matrix together with the row index where the un-rotated block landed.
//! Sorting clusters bytes that share right-context, which is what makes the
//! downstream Move-To-Front output so compressible.
//!
//! The inverse rebuilds the first column by counting, walks the row links
//! from the primary index, and strips the sentinel back off.

pub mod rotation_sort;
