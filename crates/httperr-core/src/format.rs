//! Rendering of error chains as one line per unwrap step

use std::fmt;

use crate::chain::{Link, NestedChain};

/// Line buffer handed to each frame while a trace is rendered
#[derive(Debug)]
pub struct Printer {
    line: String,
    detail: bool,
    locations: bool,
}

impl Printer {
    const fn new(formatter: Formatter) -> Self {
        Self {
            line: String::new(),
            detail: formatter.detail,
            locations: formatter.locations,
        }
    }

    /// Append text to the current frame
    pub fn print(&mut self, value: impl fmt::Display) {
        self.line.push_str(&value.to_string());
    }

    /// Whether frames should include their structured annotations
    pub const fn detail(&self) -> bool {
        self.detail
    }

    /// Whether frames should include the call site that built them
    pub const fn locations(&self) -> bool {
        self.locations
    }

    fn finish(self) -> String {
        // Frames are single lines even if an error message is not
        if self.line.contains('\n') {
            self.line.lines().collect::<Vec<_>>().join(" ")
        } else {
            self.line
        }
    }
}

/// Renders any chain into an ordered list of frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Formatter {
    detail: bool,
    locations: bool,
}

impl Formatter {
    /// Plain formatter printing only error messages
    pub const fn new() -> Self {
        Self {
            detail: false,
            locations: false,
        }
    }

    /// Include domain, reason and location annotations
    #[must_use]
    pub const fn detailed(mut self, detail: bool) -> Self {
        self.detail = detail;
        self
    }

    /// Include construction call sites
    #[must_use]
    pub const fn with_locations(mut self, locations: bool) -> Self {
        self.locations = locations;
        self
    }

    /// Walk the chain starting at `start`, producing one line per step
    ///
    /// A value without any cause renders exactly one line.
    ///
    /// # Panics
    ///
    /// Panics if a queue of chains turns up below an error that still has
    /// siblings pending, see [`ChainQueue::next`](crate::ChainQueue::next).
    pub fn render<'a>(&self, start: impl Into<Link<'a>>) -> Vec<String> {
        match self.try_render(start) {
            Ok(frames) => frames,
            Err((_, e)) => panic!("{e}"),
        }
    }

    /// Walk the chain like [`Formatter::render`], stopping at a nested queue
    ///
    /// # Errors
    ///
    /// Returns the frames rendered so far alongside [`NestedChain`]
    pub fn try_render<'a>(&self, start: impl Into<Link<'a>>) -> Result<Vec<String>, (Vec<String>, NestedChain)> {
        let mut frames = Vec::new();
        let mut next = Some(start.into());

        while let Some(link) = next {
            let mut printer = Printer::new(*self);
            let step = link.try_format_step(&mut printer);
            frames.push(printer.finish());

            match step {
                Ok(link) => next = link,
                Err(e) => return Err((frames, e)),
            }
        }

        Ok(frames)
    }

    /// Display adapter for a chain, frames separated by newlines
    pub fn trace<'a>(&self, start: impl Into<Link<'a>>) -> Trace<'a> {
        Trace {
            start: start.into(),
            formatter: *self,
        }
    }
}

/// Render a chain with the plain formatter
pub fn render<'a>(start: impl Into<Link<'a>>) -> Vec<String> {
    Formatter::new().render(start)
}

/// Lazily rendered trace, suitable as a log field
///
/// Displaying never panics: a nested queue ends the trace with a marker
/// frame instead.
#[derive(Debug, Clone, Copy)]
pub struct Trace<'a> {
    start: Link<'a>,
    formatter: Formatter,
}

impl<'a> Trace<'a> {
    /// Trace with the plain formatter
    pub fn new(start: impl Into<Link<'a>>) -> Self {
        Formatter::new().trace(start)
    }
}

impl fmt::Display for Trace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (frames, nested) = match self.formatter.try_render(self.start) {
            Ok(frames) => (frames, None),
            Err((frames, e)) => (frames, Some(e)),
        };

        for (i, frame) in frames.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(frame)?;
        }

        if let Some(e) = nested {
            write!(f, "\n<{e}>")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;
    use std::io;

    use indoc::indoc;
    use thiserror::Error;

    use super::*;
    use crate::{ErrorCategory, ErrorDocument, ErrorResponse, InnerError};

    #[derive(Debug, Error)]
    #[error("{message}")]
    struct Wrapped {
        message: String,
        source: Option<Box<Wrapped>>,
    }

    fn chain(messages: &[&str]) -> Wrapped {
        messages
            .iter()
            .rev()
            .fold(None, |source, message| {
                Some(Wrapped {
                    message: (*message).to_owned(),
                    source: source.map(Box::new),
                })
            })
            .unwrap()
    }

    fn inner(location: &str) -> InnerError {
        InnerError::new(
            "fooService",
            "invalidArgument",
            location,
            "requestBody",
            format!("Passed {location} is invalid"),
        )
    }

    #[test]
    fn leaf_renders_one_line() {
        let err = inner("id");
        let frames = render(&err);

        assert_eq!(frames.len(), 1);
        assert!(frames[0].contains("Passed id is invalid"));
    }

    #[test]
    fn plain_error_renders_its_source_chain() {
        let err = chain(&["outer", "middle", "root"]);
        let dyn_err: &(dyn StdError + 'static) = &err;

        assert_eq!(render(dyn_err), ["outer", "middle", "root"]);
    }

    #[test]
    fn flat_siblings_render_in_document_order() {
        let document = ErrorDocument::new(ErrorCategory::InvalidArgument, [inner("id"), inner("name")]);
        let frames = render(document.unwrap_chain().unwrap());

        assert_eq!(frames, ["Passed id is invalid", "Passed name is invalid"]);
    }

    #[test]
    fn n_flat_siblings_render_n_lines() {
        let names = ["a", "b", "c", "d", "e"];
        let document = ErrorDocument::new(ErrorCategory::BadRequest, names.map(inner));
        let frames = render(document.unwrap_chain().unwrap());

        assert_eq!(frames.len(), names.len());
        for (frame, name) in frames.iter().zip(names) {
            assert!(frame.contains(&format!("Passed {name} is invalid")));
        }
    }

    #[test]
    fn nested_chains_drain_depth_first() {
        let e1 = inner("id").with_cause(chain(&["A", "B", "closed pipe"]));
        let f1 = inner("name").with_cause(chain(&["no progress"]));
        let document = ErrorDocument::new(ErrorCategory::InvalidArgument, [e1, f1]);

        let frames = render(document.unwrap_chain().unwrap());

        assert_eq!(
            frames,
            [
                "Passed id is invalid",
                "A",
                "B",
                "closed pipe",
                "Passed name is invalid",
                "no progress",
            ]
        );
    }

    #[test]
    fn empty_document_renders_only_its_message() {
        let document = ErrorDocument::new(ErrorCategory::NotFound, []);

        assert!(document.unwrap_chain().is_none());
        assert_eq!(render(&document), ["Not found"]);
    }

    #[test]
    fn detailed_response_trace() {
        let response = ErrorResponse::new(
            ErrorCategory::InvalidArgument,
            [
                inner("id").with_cause(io::Error::other("closed pipe")),
                InnerError::new("usage", "rateLimitExceeded", "", "", "Rate Limit Exceeded"),
            ],
        );

        let trace = Formatter::new().detailed(true).trace(&response).to_string();

        insta::assert_snapshot!(trace, @r"
        [HTTP Status 400] Invalid argument
        Passed id is invalid [fooService.invalidArgument] at requestBody:id
        closed pipe
        Rate Limit Exceeded [usage.rateLimitExceeded]
        ");
    }

    #[test]
    fn plain_trace_joins_frames() {
        let response = ErrorResponse::new(ErrorCategory::Conflict, [inner("id"), inner("name")]);

        assert_eq!(
            Trace::new(&response).to_string(),
            indoc! {"
                [HTTP Status 409] Conflict
                Passed id is invalid
                Passed name is invalid"}
        );
    }

    #[test]
    fn locations_point_at_construction() {
        let line = line!() + 1;
        let err = InnerError::new("global", "required", "q", "parameter", "q is required");

        let frames = Formatter::new().with_locations(true).render(&err);

        assert_eq!(frames.len(), 1);
        assert!(frames[0].starts_with("q is required ("));
        assert!(frames[0].contains(&format!("{}:{line}:", file!())));
    }

    #[test]
    fn multiline_messages_stay_on_one_frame() {
        let err = io::Error::other("first\nsecond");
        let dyn_err: &(dyn StdError + 'static) = &err;

        assert_eq!(render(dyn_err), ["first second"]);
    }

    fn response_cause() -> ErrorResponse {
        ErrorResponse::new(ErrorCategory::BadRequest, [inner("x"), inner("y")])
    }

    #[test]
    fn try_render_keeps_frames_before_a_nested_queue() {
        let document = ErrorDocument::new(
            ErrorCategory::BadRequest,
            [inner("id").with_cause(response_cause()), inner("name")],
        );

        let (frames, e) = Formatter::new().try_render(document.unwrap_chain().unwrap()).unwrap_err();

        assert_eq!(frames, ["Passed id is invalid", "[HTTP Status 400] Bad request"]);
        assert_eq!(e, NestedChain);
    }

    #[test]
    #[should_panic(expected = "nested chain not supported")]
    fn render_rejects_a_nested_queue() {
        let document = ErrorDocument::new(
            ErrorCategory::BadRequest,
            [inner("id").with_cause(response_cause()), inner("name")],
        );

        let _ = render(document.unwrap_chain().unwrap());
    }

    #[test]
    fn trace_marks_a_nested_queue_instead_of_panicking() {
        let response = ErrorResponse::new(
            ErrorCategory::Conflict,
            [inner("id").with_cause(response_cause()), inner("name")],
        );

        assert_eq!(
            Trace::new(&response).to_string(),
            indoc! {"
                [HTTP Status 409] Conflict
                Passed id is invalid
                [HTTP Status 400] Bad request
                <nested chain not supported>"}
        );
    }
}
