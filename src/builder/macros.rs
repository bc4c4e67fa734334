//! Macros for ergonomic machine construction.

/// Declare a whole machine in one block.
///
/// Expands to a [`MachineBuilder`](crate::builder::MachineBuilder) chain
/// and yields `Result<Machine, BuildError>`. Either side of `=>` may be a
/// single name or a bracketed list.
///
/// # Example
///
/// ```
/// use transit::machine;
///
/// let mut order = machine! {
///     initial: "new",
///     events: [
///         "pay": "new" => "paid",
///         "ship": "paid" => "shipped",
///         "cancel": ["new", "paid"] => "cancelled",
///     ]
/// }
/// .unwrap();
///
/// assert!(order.fire("pay"));
/// assert_eq!(order.current_state(), "paid");
/// ```
#[macro_export]
macro_rules! machine {
    (
        initial: $initial:expr,
        events: [
            $( $name:literal : $from:tt => $to:tt ),* $(,)?
        ] $(,)?
    ) => {{
        $crate::builder::MachineBuilder::new()
            .initial($initial)
            $( .event($name, $crate::__state_list!($from), $crate::__state_list!($to)) )*
            .build()
    }};
}

/// Internal helper for [`machine!`]: normalize one side of a declaration.
#[doc(hidden)]
#[macro_export]
macro_rules! __state_list {
    ([ $($state:expr),* $(,)? ]) => {
        $crate::core::StateList::Many(vec![ $(String::from($state)),* ])
    };
    ($state:expr) => {
        $state
    };
}
