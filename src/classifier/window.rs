use std::collections::VecDeque;

/// Fixed-size window advanced by a fixed step
///
/// Windows are only reported when full. A step larger than the window skips
/// the samples in between.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    size: usize,
    step: usize,
    buffer: VecDeque<i32>,
    skip: usize,
}

impl RollingWindow {
    /// `size` and `step` must both be at least one.
    pub fn new(size: usize, step: usize) -> Self {
        debug_assert!(size > 0 && step > 0);
        Self {
            size,
            step,
            buffer: VecDeque::with_capacity(size),
            skip: 0,
        }
    }

    /// Add a value. Returns true when the window is full and ready to be read.
    pub fn push(&mut self, value: i32) -> bool {
        if self.skip > 0 {
            self.skip -= 1;
            return false;
        }
        self.buffer.push_back(value);
        self.buffer.len() == self.size
    }

    pub fn contents(&self) -> &VecDeque<i32> {
        &self.buffer
    }

    /// Move the window forward by one step.
    pub fn advance(&mut self) {
        if self.step < self.size {
            self.buffer.drain(..self.step);
        } else {
            self.buffer.clear();
            self.skip = self.step - self.size;
        }
    }
}

/// Iterator that evaluates `eval` on every full window
pub struct Rolling<I, F> {
    inner: I,
    window: RollingWindow,
    eval: F,
}

impl<I, F, T> Iterator for Rolling<I, F>
where
    I: Iterator<Item = i32>,
    F: FnMut(&VecDeque<i32>) -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        for value in self.inner.by_ref() {
            if self.window.push(value) {
                let out = (self.eval)(self.window.contents());
                self.window.advance();
                return Some(out);
            }
        }
        None
    }
}

pub trait RollingExt: Iterator<Item = i32> + Sized {
    fn rolling<F, T>(self, size: usize, step: usize, eval: F) -> Rolling<Self, F>
    where
        F: FnMut(&VecDeque<i32>) -> T,
    {
        Rolling {
            inner: self,
            window: RollingWindow::new(size, step),
            eval,
        }
    }
}

impl<I: Iterator<Item = i32>> RollingExt for I {}
