use std::marker::PhantomData;

/// Iterator adapter pairing every item with its position as a typed index.
pub struct Indexed<I, Idx> {
    iter: I,
    position: usize,
    _index: PhantomData<Idx>,
}

pub trait EnumerateIdx: Iterator + Sized {
    /// Like [`Iterator::enumerate`], with `Idx` in place of the bare `usize`.
    fn enumerate_idx<Idx>(self) -> Indexed<Self, Idx>
    where
        Idx: From<usize>,
    {
        Indexed {
            iter: self,
            position: 0,
            _index: PhantomData,
        }
    }
}

impl<I: Iterator> EnumerateIdx for I {}

impl<I, Idx> Iterator for Indexed<I, Idx>
where
    I: Iterator,
    Idx: From<usize>,
{
    type Item = (Idx, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next()?;
        let index = Idx::from(self.position);
        self.position += 1;

        Some((index, item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I, Idx> ExactSizeIterator for Indexed<I, Idx>
where
    I: ExactSizeIterator,
    Idx: From<usize>,
{
}
