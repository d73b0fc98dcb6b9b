//! The bucket-count ladder.
//!
//! Tables only ever have one of these sizes; each entry is a prime (or
//! prime power) roughly doubling the previous one, so that modulo-reduced
//! hashes scatter well. Growth steps to the next rung; reservations round up
//! to the first rung at least as large as the request.

use volans_core::Error;

#[cfg(target_pointer_width = "64")]
pub(crate) const TABLE_SIZES: &[usize] = &[
    0,
    1,
    3,
    5,
    11,
    23,
    53,
    97,
    193,
    389,
    769,
    1_543,
    3_079,
    6_151,
    12_289,
    24_593,
    49_157,
    98_317,
    196_613,
    393_241,
    786_433,
    1_572_869,
    3_145_739,
    6_291_469,
    12_582_917,
    25_165_843,
    50_331_653,
    100_663_319,
    201_326_611,
    402_653_189,
    805_306_457,
    1_610_612_741,
    3_221_225_473,
    6_442_450_939,
    12_884_901_893,
    25_769_803_799,
    51_539_607_551,
    103_079_215_111,
    206_158_430_209,
    412_316_860_441,
    824_633_720_831,
];

#[cfg(not(target_pointer_width = "64"))]
pub(crate) const TABLE_SIZES: &[usize] = &[
    0,
    1,
    3,
    5,
    11,
    23,
    53,
    97,
    193,
    389,
    769,
    1_543,
    3_079,
    6_151,
    12_289,
    24_593,
    49_157,
    98_317,
    196_613,
    393_241,
    786_433,
    1_572_869,
    3_145_739,
    6_291_469,
    12_582_917,
    25_165_843,
    50_331_653,
    100_663_319,
    201_326_611,
    402_653_189,
    805_306_457,
    1_610_612_741,
    3_221_225_473,
];

/// Position of `size` in the ladder. `size` must be a ladder entry.
pub(crate) fn index_of(size: usize) -> usize {
    TABLE_SIZES
        .binary_search(&size)
        .unwrap_or_else(|_| unreachable!("table size is always a ladder entry"))
}

/// Smallest ladder entry at least `hint`, or an allocation error if the
/// ladder is exhausted.
pub(crate) fn from_hint(hint: usize) -> Result<usize, Error> {
    match TABLE_SIZES.binary_search(&hint) {
        Ok(idx) => Ok(TABLE_SIZES[idx]),
        Err(idx) if idx < TABLE_SIZES.len() => Ok(TABLE_SIZES[idx]),
        Err(_) => Err(Error::AllocationFailure(
            "requested bucket count exceeds the size ladder",
        )),
    }
}
