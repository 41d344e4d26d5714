/// Captures the calling function as a [`Frame`](crate::Frame).
///
/// Pass the receiver (`site!(self)`) from inside a method so the frame knows
/// the type it belongs to.
#[macro_export]
macro_rules! site {
    () => {
        $crate::Frame::from_site(
            ::core::file!(),
            {
                fn __here() {}
                $crate::__private::type_name_of(__here)
            },
            ::core::option::Option::None,
        )
    };
    ($receiver:expr) => {
        $crate::Frame::from_site(
            ::core::file!(),
            {
                fn __here() {}
                $crate::__private::type_name_of(__here)
            },
            ::core::option::Option::Some($crate::__private::receiver_type_name(&$receiver)),
        )
    };
}

/// Prints a caller-annotated report to stdout.
///
/// ```ignore
/// report!("loaded {count} entries"; count = entries.len());
/// report!(path, flags, retries);
/// report!(self => "state changed");
/// ```
///
/// A single value is shown with `Display`, anything else with `Debug`. Named
/// values after `;` fill in `{key}` placeholders of a single message when
/// every one of them has a placeholder, otherwise they are printed on their
/// own line. Inside a method, start with `self =>` so the report names the
/// type.
///
/// Panics if writing to stdout fails, like `println!`.
#[macro_export]
macro_rules! report {
    ($receiver:ident => $($rest:tt)*) => {
        $crate::__private::report_stdout($crate::site!($receiver), $crate::__request!($($rest)*))
    };
    ($($rest:tt)*) => {
        $crate::__private::report_stdout($crate::site!(), $crate::__request!($($rest)*))
    };
}

/// Like [`report!`], but writes to the given stream and returns the
/// `std::io::Result` of writing.
#[macro_export]
macro_rules! report_to {
    ($stream:expr, $receiver:ident => $($rest:tt)*) => {
        $crate::__private::report_at(&mut $stream, $crate::site!($receiver), $crate::__request!($($rest)*))
    };
    ($stream:expr $(, $($rest:tt)*)?) => {
        $crate::__private::report_at(&mut $stream, $crate::site!(), $crate::__request!($($($rest)*)?))
    };
}

/// The name of the enclosing function
#[macro_export]
macro_rules! whoami {
    () => {
        $crate::__private::whoami({
            fn __here() {}
            $crate::__private::type_name_of(__here)
        })
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __request {
    ($($value:expr),* $(,)? $(; $($key:ident = $named:expr),* $(,)?)?) => {
        $crate::ReportRequest::new($crate::__payload!($($value),*))
            $($(.named(::core::stringify!($key), &$named))*)?
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __payload {
    ($message:expr) => {
        $crate::Payload::Message(::std::string::ToString::to_string(&$message))
    };
    ($($value:expr),*) => {
        $crate::Payload::Values(::std::vec![$($crate::Value::of(&$value)),*])
    };
}
