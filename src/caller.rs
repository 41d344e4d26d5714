//! Recovering who called into the reporter.
//!
//! Rust has no frame-local reflection, so caller identity comes from a
//! [`Frame`]: either captured at the call site by the reporting macros (the
//! file, the path of the enclosing function, and the type of the receiver when
//! the call site hands over `self`) or taken from a symbolized backtrace with
//! [`Stack::capture`]. [`CallerResolver`] turns a frame into a [`CallerInfo`].

use std::borrow::Cow;

use crate::{Error, Result};

/// Stands in for an enclosing type that cannot be recovered
pub const UNKNOWN_TYPE: &str = "<??>";

/// Appended to functions declared inside a method rather than on the type
pub const NESTED_TAG: &str = "[nested]";

pub const DEFAULT_MAX_PATH_SEGMENTS: usize = 4;

/// One activation on the call stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// The source file
    pub file: Cow<'static, str>,
    /// The full path of the executing function, e.g. `my_crate::Thing::method`
    pub function: Cow<'static, str>,
    /// The type name of the receiver (`self`), if the frame has one
    pub receiver: Option<&'static str>,
}

impl Frame {
    pub fn new(file: impl Into<Cow<'static, str>>, function: impl Into<Cow<'static, str>>) -> Self {
        Self {
            file: file.into(),
            function: function.into(),
            receiver: None,
        }
    }

    pub fn with_receiver(self, receiver: &'static str) -> Self {
        Self {
            receiver: Some(receiver),
            ..self
        }
    }

    /// Builds a frame from the type name of an item declared inside the
    /// calling function.
    #[doc(hidden)]
    pub fn from_site(file: &'static str, marker: &'static str, receiver: Option<&'static str>) -> Self {
        Self {
            file: Cow::Borrowed(file),
            function: Cow::Borrowed(function_path(marker)),
            receiver,
        }
    }
}

/// Who invoked a report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallerInfo {
    /// The source path, truncated for display
    pub source_file: String,
    pub enclosing_type_name: Option<String>,
    pub function_name: String,
    /// An associated function without a receiver
    pub is_static: bool,
    /// A method whose receiver was handed over by the call site
    pub is_bound: bool,
    /// A function declared inside a method, not on the receiver's type
    pub is_nested: bool,
}

impl CallerInfo {
    /// The enclosing type, or [`UNKNOWN_TYPE`]
    pub fn type_name(&self) -> &str {
        self.enclosing_type_name.as_deref().unwrap_or(UNKNOWN_TYPE)
    }

    /// `Type.function`, as shown in the report header
    pub fn qualifier(&self) -> String {
        format!(
            "{ty}.{name}{tag}",
            ty = self.type_name(),
            name = self.function_name,
            tag = if self.is_nested { NESTED_TAG } else { "" }
        )
    }
}

#[derive(Copy, Clone, Debug)]
pub struct CallerResolver {
    max_path_segments: usize,
}

impl Default for CallerResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PATH_SEGMENTS)
    }
}

impl CallerResolver {
    pub fn new(max_path_segments: usize) -> Self {
        Self {
            max_path_segments: max_path_segments.max(1),
        }
    }

    /// Resolves the frame `skip_frames` deep into `frames` (innermost first)
    pub fn resolve(&self, frames: &[Frame], skip_frames: usize) -> Result<CallerInfo> {
        frames
            .get(skip_frames)
            .map(|frame| self.resolve_frame(frame))
            .ok_or(Error::StackUnderflow {
                requested: skip_frames,
                depth: frames.len(),
            })
    }

    /// Walks the live stack and resolves the frame `skip_frames` above this
    /// function.
    #[inline(never)]
    pub fn resolve_current(&self, skip_frames: usize) -> Result<CallerInfo> {
        let stack = Stack::capture();
        self.resolve(stack.frames(), skip_frames)
    }

    pub fn resolve_frame(&self, frame: &Frame) -> CallerInfo {
        let mut segments = split_path(&frame.function);
        // closures and async blocks report as part of the function defining them
        while segments.last().is_some_and(|s| s.starts_with('{')) {
            segments.pop();
        }

        let function_name = segments
            .pop()
            .map(bare_type_name)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_TYPE)
            .to_string();

        let parent = segments.last().copied();
        let source_file = truncate_path(&frame.file, self.max_path_segments);

        match frame.receiver.map(bare_type_name) {
            Some(receiver) => {
                // trait default methods live under the trait, not the receiver
                let is_nested = parent.is_some_and(|parent| !names_type(parent));
                if is_nested {
                    log::trace!("'{function_name}' is declared inside another function");
                }
                CallerInfo {
                    source_file,
                    enclosing_type_name: Some(receiver.to_string()),
                    function_name,
                    is_static: false,
                    is_bound: !is_nested,
                    is_nested,
                }
            }
            None => CallerInfo {
                source_file,
                enclosing_type_name: None,
                function_name,
                is_static: parent.is_some_and(names_type),
                is_bound: false,
                is_nested: false,
            },
        }
    }
}

/// Frames of the live call stack, innermost first
#[derive(Clone, Debug, Default)]
pub struct Stack {
    frames: Vec<Frame>,
}

impl Stack {
    /// Symbolizes the current stack.
    ///
    /// The first frame is the function that called `capture`. Frames without
    /// symbol names are skipped.
    #[inline(never)]
    pub fn capture() -> Self {
        let backtrace = backtrace::Backtrace::new();

        let mut frames = backtrace
            .frames()
            .iter()
            .flat_map(|frame| frame.symbols())
            .filter_map(|symbol| {
                let name = symbol.name()?;
                let file = symbol
                    .filename()
                    .map(|path| path.display().to_string())
                    .unwrap_or_default();
                // the alternate form leaves off the hash
                Some(Frame::new(file, format!("{name:#}")))
            })
            .collect::<Vec<_>>();

        let start = frames
            .iter()
            .rposition(|frame| frame.function.ends_with("Stack::capture"))
            .map_or(0, |n| n + 1);
        frames.drain(..start);

        log::trace!("captured {} frame(s)", frames.len());
        Self { frames }
    }

    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

/// Keeps only the last `max_segments` components of `path`
pub fn truncate_path(path: &str, max_segments: usize) -> String {
    let parts = path.split(std::path::is_separator).collect::<Vec<_>>();
    if parts.len() <= max_segments {
        return path.to_string();
    }
    parts[parts.len() - max_segments..].join(std::path::MAIN_SEPARATOR_STR)
}

/// The path of the function that declared the item named by `marker`
pub(crate) fn function_path(marker: &str) -> &str {
    marker.rsplit_once("::").map_or(marker, |(path, _)| path)
}

/// The name of the function that declared the item named by `marker`
pub(crate) fn function_name(marker: &'static str) -> &'static str {
    let mut segments = split_path(function_path(marker));
    while segments.last().is_some_and(|s| s.starts_with('{')) {
        segments.pop();
    }
    segments.pop().unwrap_or(UNKNOWN_TYPE)
}

/// Splits a path on `::`, ignoring separators inside generic arguments
fn split_path(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let (mut depth, mut start) = (0usize, 0);
    let bytes = path.as_bytes();

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' | b'(' | b'[' => depth += 1,
            // the arrow in `fn() -> T` does not close anything
            b'>' if i > 0 && bytes[i - 1] == b'-' => {}
            b'>' | b')' | b']' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&path[start..i]);
                start = i + 2;
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&path[start..]);
    segments
}

/// Reduces a type (or a qualified self type like `<T as Trait>`) to its bare
/// name: no references, module path, or generic arguments
fn bare_type_name(ty: &str) -> &str {
    let mut ty = ty.trim();
    loop {
        let stripped = ["&", "mut ", "dyn ", "*const ", "*mut "]
            .iter()
            .find_map(|prefix| ty.strip_prefix(prefix));
        match stripped {
            Some(rest) => ty = rest.trim_start(),
            None => break,
        }
    }

    if let Some(inner) = ty.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        let self_ty = find_top_level(inner, " as ").map_or(inner, |n| &inner[..n]);
        return bare_type_name(self_ty);
    }

    let Some(open) = find_top_level(ty, "<") else {
        return split_path(ty).last().copied().unwrap_or(ty);
    };

    let path = &ty[..open];
    if POINTER_WRAPPERS.contains(&path) {
        if let Some(args) = ty[open + 1..].strip_suffix('>') {
            let first = find_top_level(args, ",").map_or(args, |n| &args[..n]);
            return bare_type_name(first);
        }
    }
    split_path(path).last().copied().unwrap_or(path)
}

// `self: Box<Self>` and friends name the type they point to
const POINTER_WRAPPERS: &[&str] = &[
    "alloc::boxed::Box",
    "alloc::rc::Rc",
    "alloc::sync::Arc",
    "core::pin::Pin",
    "std::boxed::Box",
    "std::rc::Rc",
    "std::sync::Arc",
    "std::pin::Pin",
];

fn find_top_level(haystack: &str, needle: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in haystack.char_indices() {
        if depth == 0 && haystack[i..].starts_with(needle) {
            return Some(i);
        }
        match ch {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

/// Whether a path segment names a type (an `impl` block) rather than a module
/// or a function
fn names_type(segment: &str) -> bool {
    segment.starts_with('<') || bare_type_name(segment).starts_with(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(function: &'static str, receiver: Option<&'static str>) -> CallerInfo {
        let frame = Frame {
            file: "src/lib.rs".into(),
            function: function.into(),
            receiver,
        };
        CallerResolver::default().resolve_frame(&frame)
    }

    #[test]
    fn free_function() {
        let info = resolve("demo::module::function_name", None);
        assert_eq!(info.function_name, "function_name");
        assert_eq!(info.qualifier(), "<??>.function_name");
        assert!(!info.is_static && !info.is_bound && !info.is_nested);
    }

    #[test]
    fn bound_method() {
        let info = resolve("demo::MyClass::method", Some("&demo::MyClass"));
        assert_eq!(info.qualifier(), "MyClass.method");
        assert!(info.is_bound);
        assert!(!info.is_nested);

        let info = resolve(
            "demo::Wrapper<alloc::string::String>::method",
            Some("&mut demo::Wrapper<alloc::string::String>"),
        );
        assert_eq!(info.qualifier(), "Wrapper.method");
    }

    #[test]
    fn trait_method() {
        let info = resolve(
            "<demo::MyClass as core::fmt::Display>::fmt",
            Some("&demo::MyClass"),
        );
        assert_eq!(info.qualifier(), "MyClass.fmt");
        assert!(info.is_bound);
    }

    #[test]
    fn closures_are_transparent() {
        let info = resolve("demo::MyClass::method::{{closure}}::{{closure}}", Some("&demo::MyClass"));
        assert_eq!(info.qualifier(), "MyClass.method");
        assert!(info.is_bound);
    }

    #[test]
    fn static_method_loses_its_type() {
        let info = resolve("demo::MyClass::static_method", None);
        assert_eq!(info.qualifier(), "<??>.static_method");
        assert!(info.is_static);

        let info = resolve("<demo::MyClass as demo::Make>::make", None);
        assert_eq!(info.qualifier(), "<??>.make");
        assert!(info.is_static);
    }

    #[test]
    fn nested_function() {
        let info = resolve("demo::MyClass::method::helper", Some("&demo::MyClass"));
        assert_eq!(info.qualifier(), "MyClass.helper[nested]");
        assert!(info.is_nested);
        assert!(!info.is_bound);
    }

    #[test]
    fn trait_default_method() {
        let info = resolve("demo::Greeter::greet", Some("&demo::MyClass"));
        assert_eq!(info.qualifier(), "MyClass.greet");
        assert!(info.is_bound);
        assert!(!info.is_nested);

        let info = resolve("demo::Greeter::greet::{{closure}}", Some("&demo::MyClass"));
        assert_eq!(info.qualifier(), "MyClass.greet");
    }

    #[test]
    fn smart_pointer_receivers() {
        for receiver in [
            "alloc::boxed::Box<demo::MyClass>",
            "alloc::boxed::Box<demo::MyClass, alloc::alloc::Global>",
            "alloc::rc::Rc<demo::MyClass>",
            "alloc::sync::Arc<demo::MyClass<u8>>",
            "core::pin::Pin<&mut demo::MyClass>",
            "&core::pin::Pin<alloc::boxed::Box<demo::MyClass>>",
        ] {
            let info = resolve("demo::MyClass::method", Some(receiver));
            assert_eq!(info.qualifier(), "MyClass.method", "{receiver}");
            assert!(info.is_bound, "{receiver}");
        }

        assert_eq!(bare_type_name("demo::Boxed<demo::MyClass>"), "Boxed");
    }

    #[test]
    fn stack_underflow() {
        let stack = Stack::from_frames(vec![Frame::new("a.rs", "a::f"), Frame::new("b.rs", "b::g")]);
        let resolver = CallerResolver::default();
        assert_eq!(resolver.resolve(stack.frames(), 1).unwrap().function_name, "g");
        assert!(matches!(
            resolver.resolve(stack.frames(), 2),
            Err(Error::StackUnderflow {
                requested: 2,
                depth: 2
            })
        ));
    }

    #[test]
    fn truncates_long_paths() {
        let sep = std::path::MAIN_SEPARATOR_STR;
        let path = ["", "home", "user", "project", "src", "module", "file.rs"].join(sep);
        assert_eq!(
            truncate_path(&path, 4),
            ["project", "src", "module", "file.rs"].join(sep)
        );
        assert_eq!(truncate_path("src/lib.rs", 4), "src/lib.rs");
    }

    #[test]
    fn split_respects_generics() {
        assert_eq!(
            split_path("<a::B<c::D> as e::F>::g::h"),
            vec!["<a::B<c::D> as e::F>", "g", "h"]
        );
        assert_eq!(
            split_path("a::Call<fn() -> u8>::run"),
            vec!["a", "Call<fn() -> u8>", "run"]
        );
    }

    #[test]
    fn bare_type_names() {
        assert_eq!(bare_type_name("&&mut a::b::Thing<u8, c::D>"), "Thing");
        assert_eq!(bare_type_name("<a::Thing as b::Trait>"), "Thing");
        assert_eq!(bare_type_name("<&a::Thing<T> as b::Trait<U>>"), "Thing");
        assert_eq!(bare_type_name("Thing"), "Thing");
    }

    #[test]
    fn marker_paths() {
        assert_eq!(function_path("demo::Thing::method::__here"), "demo::Thing::method");
        assert_eq!(function_name("demo::Thing::method::{{closure}}::__here"), "method");
    }

    #[test]
    fn captured_stack_starts_at_the_caller() {
        #[inline(never)]
        fn marker_function_for_stack_capture() -> Stack {
            Stack::capture()
        }

        let stack = marker_function_for_stack_capture();
        let first = stack.frames().first().expect("at least one frame");
        assert!(first.function.ends_with("marker_function_for_stack_capture"));
    }
}
