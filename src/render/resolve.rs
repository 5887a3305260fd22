//! Supersample resolve.
//!
//! Downsamples a [`SampleBuffer`] into the caller's RGBA8 byte buffer with a
//! box filter over each `sample_rate × sample_rate` block.

use crate::color::quantize;
use crate::error::{Error, Result};
use crate::sample_buffer::SampleBuffer;
use trueno::Vector;

/// Box-filter `buf` into `target`.
///
/// `target` must hold exactly `width * height * 4` bytes (row-major RGBA,
/// top-left origin). Every byte is overwritten; none are read.
///
/// The sample rows of each output row are summed into one accumulator that
/// is reused for the whole pass, then scaled by a trueno vector multiply.
/// At a sample rate of 1 this is a straight float-to-byte conversion.
///
/// # Errors
///
/// Returns [`Error::TargetSizeMismatch`] if `target` has the wrong length.
pub fn resolve(buf: &SampleBuffer, target: &mut [u8]) -> Result<()> {
    let width = buf.width() as usize;
    let expected = width * buf.height() as usize * 4;
    if target.len() != expected {
        return Err(Error::TargetSizeMismatch {
            expected,
            actual: target.len(),
        });
    }

    let rate = buf.sample_rate();
    let row_len = width * 4;

    if rate == 1 {
        for (dst, src) in target.chunks_exact_mut(row_len).zip(buf.samples().chunks_exact(row_len)) {
            quantize_row(dst, src);
        }
        return Ok(());
    }

    let inv_area = 1.0 / (rate * rate) as f32;
    let scale = Vector::from_vec(vec![inv_area; row_len]);
    let mut acc = vec![0.0f32; row_len];

    for (y, dst) in target.chunks_exact_mut(row_len).enumerate() {
        acc.fill(0.0);
        for sy in (y as u32 * rate)..((y as u32 + 1) * rate) {
            if let Some(row) = buf.row(sy) {
                fold_row(&mut acc, row, rate as usize);
            }
        }

        match Vector::from_slice(&acc).mul(&scale) {
            Ok(averaged) => quantize_row(dst, averaged.as_slice()),
            Err(_) => {
                for (d, &s) in dst.iter_mut().zip(&acc) {
                    *d = quantize(s * inv_area);
                }
            }
        }
    }

    Ok(())
}

/// Add each run of `rate` horizontally adjacent samples into one pixel of `acc`.
fn fold_row(acc: &mut [f32], row: &[f32], rate: usize) {
    for (px, block) in acc.chunks_exact_mut(4).zip(row.chunks_exact(rate * 4)) {
        for sample in block.chunks_exact(4) {
            for (a, &s) in px.iter_mut().zip(sample) {
                *a += s;
            }
        }
    }
}

fn quantize_row(dst: &mut [u8], src: &[f32]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = quantize(s);
    }
}
