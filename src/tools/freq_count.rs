use rayon::prelude::*;

/// Histogram of byte values.
pub type Freqs = [u32; 256];

/// Chunk size for the parallel count. 16k is pretty much the sweet spot.
const CHUNK: usize = 16_000;

/// Returns a frequency count of the input data. Uses parallelism when data set is over 64k.
pub fn freqs(data: &[u8]) -> Freqs {
    if data.len() <= 4 * CHUNK {
        return count(data);
    }
    data.par_chunks(CHUNK).map(count).reduce(
        || [0_u32; 256],
        |mut total, part| {
            total.iter_mut().zip(part.iter()).for_each(|(t, p)| *t += p);
            total
        },
    )
}

fn count(data: &[u8]) -> Freqs {
    let mut freqs = [0_u32; 256];
    data.iter().for_each(|&el| freqs[el as usize] += 1);
    freqs
}
