use crate::{Argument, Error, FormatProblem, FormatProvider, Result, TextBuilder};

/// Largest value an argument index or width can take. Longer digit runs saturate here.
const NUMBER_LIMIT: usize = 1_000_000;

impl TextBuilder<'_> {
    /// Appends the expansion of a composite format string.
    ///
    /// The template contains literal text and argument holes of the form
    /// `{index[,width][:spec]}`:
    ///
    /// * `index` selects an entry from `args`.
    /// * `width` pads the text of the argument with spaces to at least that many code units,
    ///   on the left by default or on the right if the width is prefixed with `-`.
    /// * `spec` is handed to the argument (or to the custom formatter of `provider`) unchanged.
    ///
    /// Literal braces are written as `{{` and `}}`. Spaces are permitted after the index and
    /// around the width.
    ///
    /// If `provider` has a custom formatter, it renders every argument. Otherwise arguments
    /// render themselves, writing directly into the unused capacity of the builder whenever the
    /// hole does not require left padding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the template is malformed or references an argument
    /// that is not present in `args`. Text appended for the part of the template before the
    /// problem remains in the builder.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pooled_text::TextBuilder;
    ///
    /// let mut builder = TextBuilder::with_capacity(64);
    /// builder
    ///     .format_into(
    ///         None,
    ///         "[{0,-6}|{1,6:F1}] {{{2:X}}}",
    ///         &["name".into(), (&9.87_f64).into(), (&255_i32).into()],
    ///     )
    ///     .unwrap();
    ///
    /// assert_eq!(builder.into_string(), "[name  |   9.9] {FF}");
    /// ```
    pub fn format_into(
        &mut self,
        provider: Option<&dyn FormatProvider>,
        template: &str,
        args: &[Argument<'_>],
    ) -> Result<()> {
        for segment in Segments::new(template) {
            match segment? {
                Segment::Literal(text) => self.append_str(text),
                Segment::Hole(hole) => self.append_hole(&hole, provider, args)?,
            }
        }

        Ok(())
    }

    fn append_hole(
        &mut self,
        hole: &Hole<'_>,
        provider: Option<&dyn FormatProvider>,
        args: &[Argument<'_>],
    ) -> Result<()> {
        let argument = args.get(hole.index).ok_or_else(|| {
            Error::invalid_format(
                hole.offset,
                FormatProblem::ArgumentIndexOutOfRange {
                    index: hole.index,
                    count: args.len(),
                },
            )
        })?;

        let custom = provider.and_then(|provider| {
            provider
                .custom_formatter()
                .map(|formatter| (formatter, provider))
        });

        let text = match custom {
            Some((formatter, provider)) => {
                let spec = (!hole.spec.is_empty()).then_some(hole.spec);
                formatter.format(spec, argument, provider)
            }
            None => {
                if (hole.left_justify || hole.width == 0)
                    && self.try_append_direct(argument, hole, provider)
                {
                    return Ok(());
                }

                argument.to_text(hole.spec, provider)
            }
        };

        let length = text.encode_utf16().count();
        let padding = hole.width.saturating_sub(length);

        if hole.left_justify {
            self.append_str(&text);
            self.append_repeated(u16::from(b' '), padding);
        } else {
            self.append_repeated(u16::from(b' '), padding);
            self.append_str(&text);
        }

        Ok(())
    }

    /// Writes `argument` straight into the unused capacity, padding on the right afterwards.
    /// Returns whether the argument was written.
    fn try_append_direct(
        &mut self,
        argument: &Argument<'_>,
        hole: &Hole<'_>,
        provider: Option<&dyn FormatProvider>,
    ) -> bool {
        let Some(written) = argument.try_format(self.unused_mut(), hole.spec, provider) else {
            return false;
        };

        self.advance(written);

        if hole.left_justify {
            self.append_repeated(u16::from(b' '), hole.width.saturating_sub(written));
        }

        true
    }
}

/// One argument hole of a composite format string.
#[derive(Debug, Eq, PartialEq)]
struct Hole<'t> {
    /// Byte offset of the opening brace.
    offset: usize,

    index: usize,
    width: usize,
    left_justify: bool,

    /// Empty if the hole has no `:` part.
    spec: &'t str,
}

#[derive(Debug, Eq, PartialEq)]
enum Segment<'t> {
    /// Text to copy verbatim. An escaped brace is yielded as a one-character literal.
    Literal(&'t str),

    Hole(Hole<'t>),
}

/// Splits a composite format string into literal text and argument holes in a single forward
/// pass.
///
/// Yields at most one error, after which the iterator is exhausted.
struct Segments<'t> {
    template: &'t str,

    /// Byte offset of the next unparsed character.
    position: usize,
}

impl<'t> Segments<'t> {
    fn new(template: &'t str) -> Self {
        Self {
            template,
            position: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.template.as_bytes().get(self.position).copied()
    }

    fn bump(&mut self) {
        self.position = self
            .position
            .checked_add(1)
            .expect("position stays within the template");
    }

    fn fail(&mut self, offset: usize, problem: FormatProblem) -> Error {
        self.position = self.template.len();
        Error::invalid_format(offset, problem)
    }

    /// Offset of the next `{` or `}` at or after `from`.
    fn find_brace(&self, from: usize) -> Option<usize> {
        let rest = self.template.as_bytes().get(from..)?;
        let relative = rest.iter().position(|byte| matches!(byte, b'{' | b'}'))?;

        from.checked_add(relative)
    }

    #[expect(
        clippy::string_slice,
        reason = "all slice boundaries are at ASCII bytes or at the ends of the template"
    )]
    fn scan_literal(&mut self) -> Result<Segment<'t>> {
        let start = self.position;

        let Some(brace) = self.find_brace(start) else {
            self.position = self.template.len();
            return Ok(Segment::Literal(&self.template[start..]));
        };

        if brace > start {
            self.position = brace;
            return Ok(Segment::Literal(&self.template[start..brace]));
        }

        let opening = self.peek() == Some(b'{');
        self.bump();

        match (opening, self.peek()) {
            (true, Some(b'{')) | (false, Some(b'}')) => {
                self.bump();
                Ok(Segment::Literal(&self.template[brace..=brace]))
            }
            (true, _) => self.parse_index(brace).map(Segment::Hole),
            (false, _) => Err(self.fail(brace, FormatProblem::UnexpectedClosingBrace)),
        }
    }

    fn parse_index(&mut self, offset: usize) -> Result<Hole<'t>> {
        let index = self.parse_number()?;

        self.parse_alignment(Hole {
            offset,
            index,
            width: 0,
            left_justify: false,
            spec: "",
        })
    }

    fn parse_alignment(&mut self, mut hole: Hole<'t>) -> Result<Hole<'t>> {
        self.skip_spaces();

        if self.peek() == Some(b',') {
            self.bump();
            self.skip_spaces();

            if self.peek() == Some(b'-') {
                hole.left_justify = true;
                self.bump();
            }

            hole.width = self.parse_number()?;
            self.skip_spaces();
        }

        self.parse_format_spec(hole)
    }

    #[expect(
        clippy::string_slice,
        reason = "the spec is delimited by ASCII bytes"
    )]
    fn parse_format_spec(&mut self, mut hole: Hole<'t>) -> Result<Hole<'t>> {
        match self.peek() {
            Some(b'}') => {}
            Some(b':') => {
                self.bump();
                let start = self.position;

                match self.find_brace(start) {
                    Some(end) if self.template.as_bytes().get(end) == Some(&b'}') => {
                        hole.spec = &self.template[start..end];
                        self.position = end;
                    }
                    Some(end) => return Err(self.fail(end, FormatProblem::UnclosedFormatItem)),
                    None => {
                        let end = self.template.len();
                        return Err(self.fail(end, FormatProblem::UnclosedFormatItem));
                    }
                }
            }
            _ => {
                let offset = self.position;
                return Err(self.fail(offset, FormatProblem::UnclosedFormatItem));
            }
        }

        // Past the closing brace.
        self.bump();
        Ok(hole)
    }

    /// Parses one or more ASCII digits. The value saturates at `NUMBER_LIMIT` and any further
    /// digits are consumed without effect.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "the value never exceeds NUMBER_LIMIT, so the product cannot overflow"
    )]
    fn parse_number(&mut self) -> Result<usize> {
        let offset = self.position;

        match self.peek() {
            Some(byte) if byte.is_ascii_digit() => {}
            Some(_) => return Err(self.fail(offset, FormatProblem::ExpectedAsciiDigit)),
            None => return Err(self.fail(offset, FormatProblem::UnclosedFormatItem)),
        }

        let mut value: usize = 0;

        while let Some(byte) = self.peek().filter(u8::is_ascii_digit) {
            if value < NUMBER_LIMIT {
                value = (value * 10 + usize::from(byte - b'0')).min(NUMBER_LIMIT);
            }

            self.bump();
        }

        Ok(value)
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.bump();
        }
    }
}

impl<'t> Iterator for Segments<'t> {
    type Item = Result<Segment<'t>>;

    fn next(&mut self) -> Option<Self::Item> {
        (self.position < self.template.len()).then(|| self.scan_literal())
    }
}
