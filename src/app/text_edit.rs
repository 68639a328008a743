//! 입력 다이얼로그 텍스트 편집 (바이트 커서, UTF-8 경계 보장)

pub(super) struct TextBufferEdit;

impl TextBufferEdit {
    pub(super) fn insert_char(value: &mut String, cursor_pos: &mut usize, c: char) {
        value.insert(*cursor_pos, c);
        *cursor_pos += c.len_utf8();
    }

    pub(super) fn backspace(value: &mut String, cursor_pos: &mut usize) {
        if *cursor_pos == 0 {
            return;
        }

        let prev = Self::prev_char_start(value, *cursor_pos);
        value.remove(prev);
        *cursor_pos = prev;
    }

    pub(super) fn delete(value: &mut String, cursor_pos: &mut usize) {
        if *cursor_pos < value.len() {
            value.remove(*cursor_pos);
        }
    }

    pub(super) fn clear(value: &mut String, cursor_pos: &mut usize) {
        value.clear();
        *cursor_pos = 0;
    }

    pub(super) fn left(value: &str, cursor_pos: &mut usize) {
        if *cursor_pos == 0 {
            return;
        }

        *cursor_pos = Self::prev_char_start(value, *cursor_pos);
    }

    pub(super) fn right(value: &str, cursor_pos: &mut usize) {
        if *cursor_pos >= value.len() {
            return;
        }

        *cursor_pos = value[*cursor_pos..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| *cursor_pos + i)
            .unwrap_or(value.len());
    }

    pub(super) fn home(cursor_pos: &mut usize) {
        *cursor_pos = 0;
    }

    pub(super) fn end(value: &str, cursor_pos: &mut usize) {
        *cursor_pos = value.len();
    }

    /// 커서 앞 단어 삭제 (경로 구분자와 셀 값 구분자를 단어 경계로 취급)
    pub(super) fn delete_prev_word(value: &mut String, cursor_pos: &mut usize) {
        if *cursor_pos == 0 {
            return;
        }

        let original = *cursor_pos;
        let mut pos = original;

        // 커서 왼쪽 구분자 건너뜀
        while pos > 0 {
            let prev = Self::prev_char_start(value, pos);
            if !Self::char_at_is_delimiter(value, prev, pos) {
                break;
            }
            pos = prev;
        }

        while pos > 0 {
            let prev = Self::prev_char_start(value, pos);
            if Self::char_at_is_delimiter(value, prev, pos) {
                break;
            }
            pos = prev;
        }

        value.replace_range(pos..original, "");
        *cursor_pos = pos;
    }

    fn char_at_is_delimiter(value: &str, start: usize, end: usize) -> bool {
        value[start..end]
            .chars()
            .next()
            .is_some_and(Self::is_word_delimiter)
    }

    fn prev_char_start(value: &str, cursor_pos: usize) -> usize {
        value[..cursor_pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn is_word_delimiter(ch: char) -> bool {
        ch.is_whitespace()
            || matches!(
                ch,
                '/' | '\\' | ':' | ';' | ',' | '.' | '-' | '_' | '(' | ')' | '"' | '\''
            )
    }
}
