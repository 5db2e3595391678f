/// A question as displayed: options in presentation order plus the position of
/// the correct one. Rebuilt every time a question is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffledQuestion {
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
}

impl ShuffledQuestion {
    /// Lay out `incorrect_options` in the given order with the correct option
    /// inserted at `correct_index`. An index past the end places it last.
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        correct_option: impl Into<String>,
        incorrect_options: Vec<String>,
        correct_index: usize,
    ) -> Self {
        let correct_index = correct_index.min(incorrect_options.len());
        let mut options = incorrect_options;
        options.insert(correct_index, correct_option.into());
        Self {
            prompt: prompt.into(),
            options,
            correct_index,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        self.options
            .get(self.correct_index)
            .map_or("", String::as_str)
    }
}
