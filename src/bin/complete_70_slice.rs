use thiserror::Error;

// =============================================================================
// Milestone 1: Slice descriptors with negative indices and clamping
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SliceError {
    #[error("slice step cannot be zero")]
    ZeroStep,
}

/// A `start:stop:step` descriptor. Missing parts take the usual defaults, and
/// negative positions count from the end of whatever is being sliced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slice {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl Slice {
    pub const fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Self { start, stop, step }
    }

    /// `[:]`
    pub const fn all() -> Self {
        Self::new(None, None, None)
    }

    /// `[start:stop]`
    pub const fn range(start: isize, stop: isize) -> Self {
        Self::new(Some(start), Some(stop), None)
    }

    /// `[:stop]`
    pub const fn up_to(stop: isize) -> Self {
        Self::new(None, Some(stop), None)
    }

    /// `[start:]`
    pub const fn starting_at(start: isize) -> Self {
        Self::new(Some(start), None, None)
    }

    pub const fn step(self, step: isize) -> Self {
        Self { step: Some(step), ..self }
    }

    /// Resolves the descriptor against a sequence of `len` elements.
    ///
    /// Out-of-range bounds are clamped to the sequence, so the result is always
    /// the valid intersection (possibly empty). Only a zero step is rejected.
    pub fn indices(&self, len: usize) -> Result<Indices, SliceError> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(SliceError::ZeroStep);
        }

        let len = len as isize;
        let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };

        let clamp = |index: isize| {
            if index < 0 {
                (index + len).max(lower)
            } else {
                index.min(upper)
            }
        };

        let start = self.start.map_or(if step > 0 { lower } else { upper }, clamp);
        let stop = self.stop.map_or(if step > 0 { upper } else { lower }, clamp);

        // Both ends lie in `-1..=len`, so the distance fits; the step may not.
        let distance = if step > 0 { stop - start } else { start - stop };
        let count = if distance > 0 {
            (distance as usize - 1) / step.unsigned_abs() + 1
        } else {
            0
        };

        Ok(Indices {
            next: start,
            step,
            remaining: count,
        })
    }
}

/// The positions selected by a resolved [`Slice`], in visiting order.
#[derive(Debug, Clone)]
pub struct Indices {
    next: isize,
    step: isize,
    remaining: usize,
}

impl Iterator for Indices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next;
        // Steps past the end wrap instead of overflowing; that position is never read.
        self.next = self.next.wrapping_add(self.step);
        self.remaining -= 1;
        Some(current as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Indices {}

// =============================================================================
// Milestone 2: Slicing sequences and text through one extension trait
// =============================================================================

pub trait SliceExt {
    type Output;

    fn sliced(&self, slice: Slice) -> Result<Self::Output, SliceError>;
}

impl<T: Clone> SliceExt for [T] {
    type Output = Vec<T>;

    fn sliced(&self, slice: Slice) -> Result<Vec<T>, SliceError> {
        Ok(slice
            .indices(self.len())?
            .map(|i| self[i].clone())
            .collect())
    }
}

// Positions are characters, not bytes.
impl SliceExt for str {
    type Output = String;

    fn sliced(&self, slice: Slice) -> Result<String, SliceError> {
        let chars: Vec<char> = self.chars().collect();
        Ok(slice.indices(chars.len())?.map(|i| chars[i]).collect())
    }
}

// =============================================================================
// Milestone 3: The lesson itself
// =============================================================================

fn main() -> Result<(), SliceError> {
    let names = ["Michael", "Sarah", "Tracy", "Bob", "Jack"];

    println!("L[0:3] = {:?}", names.sliced(Slice::range(0, 3))?);
    println!("L[:3] = {:?}", names.sliced(Slice::up_to(3))?);
    println!("L[1:3] = {:?}", names.sliced(Slice::range(1, 3))?);
    println!("L[-2:] = {:?}", names.sliced(Slice::starting_at(-2))?);

    let numbers: Vec<u32> = (0..100).collect();
    println!("R[:10] = {:?}", numbers.sliced(Slice::up_to(10))?);
    println!("R[-10:] = {:?}", numbers.sliced(Slice::starting_at(-10))?);
    println!("R[10:20] = {:?}", numbers.sliced(Slice::range(10, 20))?);
    println!("R[:10:2] = {:?}", numbers.sliced(Slice::up_to(10).step(2))?);
    println!("R[::5] = {:?}", numbers.sliced(Slice::all().step(5))?);

    let text = "hello, world";
    println!("S[:5] = {}", text.sliced(Slice::up_to(5))?);
    println!("S[7:] = {}", text.sliced(Slice::starting_at(7))?);

    Ok(())
}
