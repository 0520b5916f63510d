use std::iter;

use glam::{ivec2, IVec2};

pub trait StrExt {
    /// Split text at whitespace so it fits within `max_width`.
    ///
    /// Words that are longer than `max_width` will be sliced into `max_width`
    /// sized segments.
    fn split_fitting(&self, max_width: usize) -> (&str, &str);

    /// Iterate over lines of text that fit within `max_width`.
    fn lines_of(&self, max_width: usize) -> impl Iterator<Item = &str>;

    /// Create formatted help strings given a keyboard shortcut and a command
    /// name that try to embed the shortcut in the name as a mnemonic.
    ///
    /// ```
    /// # use util::StrExt;
    /// assert_eq!("z".input_help_string("party"), "z) party");
    /// assert_eq!("s".input_help_string("save"), "s)ave");
    /// assert_eq!("m".input_help_string("resume"), "resu(m)e");
    /// ```
    fn input_help_string(&self, command: &str) -> String;

    fn is_capitalized(&self) -> bool;

    fn capitalize(&self) -> String;

    /// Get the smallest common indentation depth of nonempty lines of text.
    ///
    /// Both tabs and spaces are treated as a single unit of indentation.
    fn indentation(&self) -> usize;

    /// Return non-whitespace chars from a block of text mapped to their
    /// coordinates.
    ///
    /// Common indentation and leading empty lines are skipped, so a map
    /// drawn inside an indented string literal starts from origin.
    fn char_grid(&self) -> impl Iterator<Item = (IVec2, char)> + '_;
}

impl StrExt for str {
    fn split_fitting(&self, max_width: usize) -> (&str, &str) {
        assert!(max_width > 0, "split_fitting: zero width");

        // Fast path, fits on a single line.
        if self.chars().count() <= max_width && !self.contains('\n') {
            return (self, "");
        }

        // Byte offset where the split-off line ends.
        let mut line_end = None;
        let mut in_whitespace = true;

        for (i, (pos, c)) in self.char_indices().enumerate() {
            if c == '\n' {
                line_end = Some(pos);
                break;
            }

            if i >= max_width {
                if c.is_whitespace() && !in_whitespace {
                    // Word ends right at the edge.
                    line_end = Some(pos);
                }
                // No word break seen, cut mid-word.
                line_end = line_end.or(Some(pos));
                break;
            }

            if c.is_whitespace() {
                if i > 0 && !in_whitespace {
                    line_end = Some(pos);
                }
                in_whitespace = true;
            } else {
                in_whitespace = false;
            }
        }

        let line_end = line_end.unwrap_or(self.len());

        // Eat the whitespace between the lines, but at most one newline.
        let rest = &self[line_end..];
        let mut skip = rest.len();
        for (i, c) in rest.char_indices() {
            if c == '\n' {
                skip = i + 1;
                break;
            }
            if !c.is_whitespace() {
                skip = i;
                break;
            }
        }

        (&self[..line_end], &rest[skip..])
    }

    fn lines_of(&self, max_width: usize) -> impl Iterator<Item = &str> {
        let mut text = self;
        iter::from_fn(move || {
            if text.is_empty() {
                return None;
            }
            let (line, rest) = text.split_fitting(max_width);
            text = rest;
            Some(line)
        })
    }

    fn input_help_string(&self, command: &str) -> String {
        if self.chars().count() == 1 {
            if let Some(p) = command.to_lowercase().find(&self.to_lowercase())
            {
                let tail = &command[p + self.len()..];
                return if p == 0 {
                    format!("{self}){tail}")
                } else {
                    format!("{}({self}){tail}", &command[..p])
                };
            }
        }
        format!("{self}) {command}")
    }

    fn is_capitalized(&self) -> bool {
        self.chars().next().is_some_and(|c| c.is_uppercase())
    }

    fn capitalize(&self) -> String {
        let mut chars = self.chars();
        match chars.next() {
            None => String::new(),
            Some(c) => c.to_uppercase().chain(chars).collect(),
        }
    }

    fn indentation(&self) -> usize {
        self.lines()
            .filter(|a| !a.trim().is_empty())
            .map(|a| a.chars().take_while(|c| c.is_whitespace()).count())
            .min()
            .unwrap_or(0)
    }

    fn char_grid(&self) -> impl Iterator<Item = (IVec2, char)> + '_ {
        let x_skip = self.indentation();

        self.lines()
            .skip_while(|a| a.trim().is_empty())
            .enumerate()
            .flat_map(move |(y, line)| {
                line.chars()
                    .skip(x_skip)
                    .enumerate()
                    .filter(|(_, c)| !c.is_whitespace())
                    .map(move |(x, c)| (ivec2(x as i32, y as i32), c))
            })
    }
}
