/// Single-line command input with a cursor and recall history.
#[derive(Debug, Default)]
pub(super) struct Input {
    pub(super) buf: String,
    /// Byte offset into `buf`; always on a char boundary.
    pub(super) cursor: usize,
    history: Vec<String>,
    /// Index into `history` while recalling, `None` while typing fresh text.
    history_pos: Option<usize>,
}

impl Input {
    pub(super) fn clear(&mut self) {
        self.buf.clear();
        self.cursor = 0;
        self.history_pos = None;
    }

    pub(super) fn set(&mut self, text: &str) {
        self.buf = text.to_string();
        self.cursor = self.buf.len();
    }

    pub(super) fn insert_char(&mut self, c: char) {
        self.buf.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.history_pos = None;
    }

    pub(super) fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let Some((idx, c)) = self.buf[..self.cursor].char_indices().next_back() else {
            return;
        };
        self.buf.remove(idx);
        self.cursor -= c.len_utf8();
        self.history_pos = None;
    }

    pub(super) fn delete(&mut self) {
        if self.cursor < self.buf.len() {
            self.buf.remove(self.cursor);
            self.history_pos = None;
        }
    }

    pub(super) fn move_left(&mut self) {
        if let Some((idx, _)) = self.buf[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    pub(super) fn move_right(&mut self) {
        if self.cursor < self.buf.len() {
            let mut iter = self.buf[self.cursor..].chars();
            if let Some(c) = iter.next() {
                self.cursor += c.len_utf8();
            }
        }
    }

    pub(super) fn push_history(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        if self.history.last().map(String::as_str) == Some(line) {
            return;
        }
        self.history.push(line.to_string());
    }

    pub(super) fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next = match self.history_pos {
            None => self.history.len() - 1,
            Some(0) => 0,
            Some(pos) => pos - 1,
        };
        self.history_pos = Some(next);
        let line = self.history[next].clone();
        self.set(&line);
    }

    pub(super) fn history_down(&mut self) {
        let Some(pos) = self.history_pos else {
            return;
        };
        if pos + 1 < self.history.len() {
            self.history_pos = Some(pos + 1);
            let line = self.history[pos + 1].clone();
            self.set(&line);
        } else {
            self.history_pos = None;
            self.buf.clear();
            self.cursor = 0;
        }
    }
}
