use crate::tools::freq_count::freqs;
use log::{debug, info};
use rayon::prelude::*;

/// Above this size each sorting pass runs on rayon.
const PAR_SORT: usize = 40_000;

/// Burrows-Wheeler-Transform using Rayon to multi-thread the sorting passes. Rotations are sorted by
/// prefix doubling, so runs and repeats anywhere in the block cost no more than ordinary data.
/// This writes the BWT data to bwt (same length as block) and returns the u32 key (primary index).
pub fn bwt_encode(block: &[u8], bwt: &mut [u8]) -> u32 {
    info!("Sorting {} rotations.", block.len());
    let index = doubling_sort(block);
    emit(block, &index, bwt)
}

/// Write the last column of the sorted rotations and return the row holding rotation 0.
fn emit(block: &[u8], index: &[u32], bwt: &mut [u8]) -> u32 {
    let mut key = 0_u32;
    for (i, &start) in index.iter().enumerate() {
        if start == 0 {
            key = i as u32;
            bwt[i] = block[block.len() - 1];
        } else {
            bwt[i] = block[start as usize - 1];
        }
    }
    key
}

/// Sort rotation start positions by prefix doubling. Each pass sorts on (rank of the first h bytes,
/// rank of the next h bytes), so long runs never cost more than log2(n) passes.
fn doubling_sort(block: &[u8]) -> Vec<u32> {
    let n = block.len();
    let mut index = (0_u32..n as u32).collect::<Vec<u32>>();
    if n < 2 {
        return index;
    }
    let mut rank = block.iter().map(|&b| b as u32).collect::<Vec<u32>>();
    let mut next = vec![0_u32; n];
    let mut h = 1;

    loop {
        let key = |i: u32| (rank[i as usize], rank[(i as usize + h) % n]);
        if n > PAR_SORT {
            index.par_sort_unstable_by_key(|&i| key(i));
        } else {
            index.sort_unstable_by_key(|&i| key(i));
        }

        // Re-rank. Equal keys share a rank.
        next[index[0] as usize] = 0;
        for w in 1..n {
            let bump = (key(index[w - 1]) != key(index[w])) as u32;
            next[index[w] as usize] = next[index[w - 1] as usize] + bump;
        }
        std::mem::swap(&mut rank, &mut next);

        // Done when every rotation is unique, or when 2h bytes already cover the whole rotation
        if rank[index[n - 1] as usize] as usize == n - 1 || 2 * h >= n {
            break;
        }
        h *= 2;
    }
    debug!("Doubling sort finished at h = {}.", h);
    index
}

/// Decode a Burrows-Wheeler-Transform into out (at least bwt_in.len() bytes).
pub fn bwt_decode(key: u32, bwt_in: &[u8], out: &mut [u8]) {
    let end = bwt_in.len();
    let freq_in = freqs(bwt_in);

    // Convert frequency count to a cumulative sum of frequencies
    let mut freq = [0_u32; 256];
    for i in 0..255 {
        freq[i + 1] = freq[i] + freq_in[i];
    }

    // Build the transformation vec to find the next character in the original data
    let mut t_vec = vec![0_u32; end];
    for (i, &s) in bwt_in.iter().enumerate() {
        t_vec[freq[s as usize] as usize] = i as u32;
        freq[s as usize] += 1
    }

    // Follow the chain starting from the key
    let mut pos = t_vec[key as usize];
    for byte in out.iter_mut().take(end) {
        *byte = bwt_in[pos as usize];
        pos = t_vec[pos as usize];
    }
}
