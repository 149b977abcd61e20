//! Buffered reversal of a forward-only sequence.

use seqops_core::buffer::SequenceBuffer;

/// Yields the source back-to-front. The source is buffered on the first pull.
pub struct Reverse<I: Iterator> {
    state: State<I>,
}

enum State<I: Iterator> {
    Pending(I),
    Draining(std::iter::Rev<std::vec::IntoIter<I::Item>>),
}

impl<I: Iterator> Reverse<I> {
    pub fn new(source: I) -> Self {
        Self {
            state: State::Pending(source),
        }
    }
}

impl<I: Iterator> Iterator for Reverse<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            match &mut self.state {
                State::Draining(items) => return items.next(),
                State::Pending(_) => {
                    let pending = std::mem::replace(
                        &mut self.state,
                        State::Draining(Vec::new().into_iter().rev()),
                    );
                    if let State::Pending(source) = pending {
                        let buffer = SequenceBuffer::new(source);
                        self.state = State::Draining(buffer.into_vec().into_iter().rev());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn reverses_lazily() {
        let pulled = Cell::new(0);
        let mut rev = Reverse::new((1..=3).inspect(|_| pulled.set(pulled.get() + 1)));
        assert_eq!(pulled.get(), 0);
        assert_eq!(rev.next(), Some(3));
        assert_eq!(pulled.get(), 3);
        assert_eq!(rev.collect::<Vec<_>>(), vec![2, 1]);
    }
}
