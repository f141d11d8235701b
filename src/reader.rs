pub(crate) struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub(crate) fn from_index(mut i: usize, data: &[u8]) -> Self {
        // i must not exceed the length of data
        i = i.min(data.len());
        let mut position = Position { line: 1, column: 1 };
        for ch in &data[..i] {
            match *ch {
                b'\n' => {
                    position.line += 1;
                    position.column = 1;
                }
                _ => {
                    position.column += 1;
                }
            }
        }
        position
    }
}

/// Cursor over a JSON text that has already been validated as UTF-8.
pub(crate) struct Read<'a> {
    slice: &'a [u8],
    index: usize,
}

impl<'a> Read<'a> {
    pub(crate) fn new(slice: &'a [u8]) -> Self {
        Self { slice, index: 0 }
    }

    #[inline(always)]
    pub(crate) fn remain(&self) -> usize {
        self.slice.len() - self.index
    }

    #[inline(always)]
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    #[inline(always)]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.slice.get(self.index).copied()
    }

    #[inline(always)]
    pub(crate) fn next(&mut self) -> Option<u8> {
        self.peek().map(|ch| {
            self.index += 1;
            ch
        })
    }

    #[inline(always)]
    pub(crate) fn next_n(&mut self, n: usize) -> Option<&'a [u8]> {
        let new_index = self.index + n;
        if new_index <= self.slice.len() {
            let ret = &self.slice[self.index..new_index];
            self.index = new_index;
            Some(ret)
        } else {
            None
        }
    }

    #[inline(always)]
    pub(crate) fn eat(&mut self, n: usize) {
        self.index = (self.index + n).min(self.slice.len());
    }

    #[inline(always)]
    pub(crate) fn backward(&mut self, n: usize) {
        self.index -= n;
    }

    #[inline(always)]
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        &self.slice[start..end]
    }

    #[inline(always)]
    pub(crate) fn as_u8_slice(&self) -> &'a [u8] {
        self.slice
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_read() {
        let mut read = Read::new(b"[1, 2]");
        assert_eq!(read.next(), Some(b'['));
        assert_eq!(read.peek(), Some(b'1'));
        assert_eq!(read.next_n(3), Some(&b"1, "[..]));
        assert_eq!(read.remain(), 2);
        read.backward(1);
        assert_eq!(read.next(), Some(b' '));
        read.eat(10);
        assert_eq!(read.next(), None);
        assert_eq!(read.index(), 6);
    }

    #[test]
    fn test_position() {
        let pos = Position::from_index(0, b"[]");
        assert_eq!((pos.line, pos.column), (1, 1));
        let pos = Position::from_index(5, b"[\n  1]");
        assert_eq!((pos.line, pos.column), (2, 4));
        let pos = Position::from_index(100, b"ab");
        assert_eq!((pos.line, pos.column), (1, 3));
    }
}
