//! Macro forms of the function combinators.
//!
//! [`compose!`](crate::compose!) takes any number of functions,
//! [`partial!`](crate::partial!) fixes either argument of a binary function
//! and [`curry2!`](crate::curry2!) curries without boxing the inner closure.

/// Composes functions right to left: `compose!(f, g, h)(x) = f(g(h(x)))`.
///
/// # Examples
///
/// ```
/// use lazyseq::sequence::{Sequence, range};
///
/// let label = lazyseq::compose!(
///     |value: i64| format!("<{value}>"),
///     |value: i64| value * 10,
///     |value: i64| value + 1,
/// );
/// let labels = range(1, 2).map(label).to_array().unwrap();
/// assert_eq!(labels, vec!["<20>", "<30>"]);
/// ```
#[macro_export]
macro_rules! compose {
    ($function:expr $(,)?) => {
        $function
    };

    ($outer_function:expr, $inner_function:expr $(,)?) => {{
        let outer = $outer_function;
        let inner = $inner_function;
        move |input| outer(inner(input))
    }};

    ($outer_function:expr, $($remaining_functions:expr),+ $(,)?) => {{
        let outer = $outer_function;
        let inner_composed = $crate::compose!($($remaining_functions),+);
        move |input| outer(inner_composed(input))
    }};
}

/// Fixes arguments of a binary function. `__` marks the argument left open.
///
/// Fixed arguments are cloned on every call, so the result is `Fn` and can be
/// handed to a sequence combinator.
///
/// # Examples
///
/// ```
/// use lazyseq::sequence::{Sequence, range};
///
/// let subtract = |left: i64, right: i64| left - right;
/// let from_ten = lazyseq::partial!(subtract, 10, __);
/// let minus_one = lazyseq::partial!(subtract, __, 1);
///
/// assert_eq!(range(1, 3).map(from_ten).to_array().unwrap(), vec![9, 8, 7]);
/// assert_eq!(range(1, 3).map(minus_one).to_array().unwrap(), vec![0, 1, 2]);
/// ```
#[macro_export]
macro_rules! partial {
    ($function:expr, __, __ $(,)?) => {{
        let function = $function;
        move |first, second| function(first, second)
    }};

    ($function:expr, $first:expr, __ $(,)?) => {{
        let function = $function;
        let first = $first;
        move |second| function(first.clone(), second)
    }};

    ($function:expr, __, $second:expr $(,)?) => {{
        let function = $function;
        let second = $second;
        move |first| function(first, second.clone())
    }};

    ($function:expr, $first:expr, $second:expr $(,)?) => {{
        let function = $function;
        let first = $first;
        let second = $second;
        move || function(first.clone(), second.clone())
    }};
}

/// Curries a binary function: `curry2!(f)(a)(b) = f(a, b)`.
///
/// Unlike [`curry`](crate::compose::curry) the partially applied closure is
/// not boxed. The first argument is shared through an `Rc` and moved out on
/// the last call.
///
/// # Examples
///
/// ```
/// use lazyseq::sequence::{Sequence, iterate};
///
/// let repeat = lazyseq::curry2!(|text: String, count: usize| text.repeat(count));
/// let dashes = repeat(String::from("-"));
/// let rules = iterate(vec![1, 3]).map(dashes).to_array().unwrap();
/// assert_eq!(rules, vec!["-", "---"]);
/// ```
#[macro_export]
macro_rules! curry2 {
    ($function:expr $(,)?) => {{
        let function = ::std::rc::Rc::new($function);
        move |first| {
            let function = ::std::rc::Rc::clone(&function);
            let first = ::std::rc::Rc::new(first);
            move |second| {
                function(
                    ::std::rc::Rc::unwrap_or_clone(::std::rc::Rc::clone(&first)),
                    second,
                )
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::sequence::{Sequence, iterate};

    #[test]
    fn test_compose_single_is_the_function() {
        let double = |value: i32| value * 2;
        assert_eq!(compose!(double)(5), 10);
    }

    #[test]
    fn test_compose_three_applies_right_to_left() {
        let add_one = |value: i32| value + 1;
        let double = |value: i32| value * 2;
        let square = |value: i32| value * value;
        assert_eq!(compose!(add_one, double, square)(3), 19);
    }

    #[test]
    fn test_partial_with_both_arguments_fixed() {
        let join = |left: String, right: &str| left + right;
        let greeting = partial!(join, String::from("hello, "), "world");
        assert_eq!(greeting(), "hello, world");
        assert_eq!(greeting(), "hello, world");
    }

    #[test]
    fn test_partial_with_no_arguments_fixed() {
        let add = partial!(|left: i32, right: i32| left + right, __, __);
        assert_eq!(add(2, 3), 5);
    }

    #[test]
    fn test_curry2_reuses_first_argument() {
        let scale = curry2!(|factor: i64, value: i64| factor * value);
        let triple = scale(3);
        assert_eq!(iterate(vec![1, 2]).map(&triple).to_array().unwrap(), vec![3, 6]);
        assert_eq!(triple(5), 15);
    }
}
