//! Edge detection over discrete token streams
//!
//! A leading edge reports the token being entered, a trailing edge reports the
//! token being left. The first token never produces an edge.

/// Single-step transition detector
///
/// Holds only the last token seen. Build a fresh one per stream.
#[derive(Debug, Clone)]
pub struct EdgeDetector<T> {
    last: Option<T>,
}

impl<T> Default for EdgeDetector<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: PartialEq + Clone> EdgeDetector<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one token, returning the token being left if it differs from the
    /// previous one.
    pub fn trailing(&mut self, token: T) -> Option<T> {
        match self.last.replace(token) {
            Some(previous) if Some(&previous) != self.last.as_ref() => Some(previous),
            _ => None,
        }
    }

    /// Feed one token, returning it if it differs from the previous one.
    pub fn leading(&mut self, token: T) -> Option<T> {
        let changed = matches!(&self.last, Some(previous) if *previous != token);
        self.last = Some(token);
        if changed {
            self.last.clone()
        } else {
            None
        }
    }

    /// Most recently observed token
    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }
}

/// Iterator of leading edges, see [`EdgeExt::leading_edges`]
pub struct LeadingEdges<I: Iterator> {
    inner: I,
    detector: EdgeDetector<I::Item>,
}

impl<I> Iterator for LeadingEdges<I>
where
    I: Iterator,
    I::Item: PartialEq + Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        for token in self.inner.by_ref() {
            if let Some(edge) = self.detector.leading(token) {
                return Some(edge);
            }
        }
        None
    }
}

/// Iterator of trailing edges, see [`EdgeExt::trailing_edges`]
pub struct TrailingEdges<I: Iterator> {
    inner: I,
    detector: EdgeDetector<I::Item>,
}

impl<I> Iterator for TrailingEdges<I>
where
    I: Iterator,
    I::Item: PartialEq + Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        for token in self.inner.by_ref() {
            if let Some(edge) = self.detector.trailing(token) {
                return Some(edge);
            }
        }
        None
    }
}

pub trait EdgeExt: Iterator + Sized
where
    Self::Item: PartialEq + Clone,
{
    /// Yield each token that differs from its predecessor.
    fn leading_edges(self) -> LeadingEdges<Self> {
        LeadingEdges {
            inner: self,
            detector: EdgeDetector::new(),
        }
    }

    /// Yield the predecessor of each token that differs from it, i.e. the
    /// value of every run that has just ended.
    fn trailing_edges(self) -> TrailingEdges<Self> {
        TrailingEdges {
            inner: self,
            detector: EdgeDetector::new(),
        }
    }
}

impl<I> EdgeExt for I
where
    I: Iterator,
    I::Item: PartialEq + Clone,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_token_is_never_an_edge() {
        let mut detector = EdgeDetector::new();
        assert_eq!(detector.leading(true), None);

        let mut detector = EdgeDetector::new();
        assert_eq!(detector.trailing(true), None);
    }

    #[test]
    fn test_leading_reports_new_token() {
        let edges: Vec<&str> = vec!["a", "a", "b", "b", "b", "c", "a"]
            .into_iter()
            .leading_edges()
            .collect();
        assert_eq!(edges, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_trailing_reports_token_left() {
        let edges: Vec<&str> = vec!["a", "a", "b", "b", "b", "c", "a"]
            .into_iter()
            .trailing_edges()
            .collect();
        assert_eq!(edges, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unterminated_run_has_no_trailing_edge() {
        let edges: Vec<bool> = vec![false, true, true, true]
            .into_iter()
            .trailing_edges()
            .collect();
        assert_eq!(edges, vec![false]);
    }

    #[test]
    fn test_one_edge_per_run_regardless_of_length() {
        for n in 1..20 {
            let mut tokens = vec![false; 3];
            tokens.extend(std::iter::repeat(true).take(n));
            tokens.extend(vec![false; 2]);

            let rising = tokens.clone().into_iter().leading_edges().filter(|&t| t).count();
            let falling = tokens.into_iter().trailing_edges().filter(|&t| t).count();
            assert_eq!(rising, 1, "run length {}", n);
            assert_eq!(falling, 1, "run length {}", n);
        }
    }

    #[test]
    fn test_last_tracks_latest_token() {
        let mut detector = EdgeDetector::new();
        detector.trailing(1);
        detector.trailing(2);
        assert_eq!(detector.last(), Some(&2));
    }
}
