use std::rc::Rc;

/// The arguments of a memoized selector are compared with the ones from the
/// previous call. Reference counted values compare by pointer, so an untouched
/// slice of the state is a cache hit even after the state itself is replaced.
/// Copyable values, including `Option<i64>` and the like, compare by value.
///
/// The type parameter keeps the `Rc` and `Copy` implementations from
/// overlapping.
pub trait SelectorArg<T> {
    fn is_same(&self, cached: &Self) -> bool;
}

impl<T> SelectorArg<T> for Rc<T> {
    fn is_same(&self, cached: &Self) -> bool {
        Rc::ptr_eq(self, cached)
    }
}

impl<T> SelectorArg<T> for Option<Rc<T>> {
    fn is_same(&self, cached: &Self) -> bool {
        match (self, cached) {
            (Some(value), Some(cached)) => Rc::ptr_eq(value, cached),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Copy + PartialEq> SelectorArg<T> for T {
    fn is_same(&self, cached: &Self) -> bool {
        self == cached
    }
}

/// Create a memoized selector. The listed input selectors run on every call,
/// and the body only re-runs when one of their results changed.
///
/// ```ignore
/// selector!(
///     pub fn get_composters(state: Rc<GameState>) -> Rc<Composters> {
///         memoize | buildings: get_buildings -> Rc<Buildings> | {
///             ...
///         }
///     }
/// );
/// ```
#[macro_export]
macro_rules! selector {
    (
        pub fn $fn_name:ident(state: $State:ty) -> $Returns:ty {
            memoize |
                $( $arg_name:ident: $arg_selector:ident -> $ArgType:ty ),*
            |
            $contents:block
        }
    ) => { paste::paste! {
        pub fn $fn_name(state: $State) -> $Returns {
            // Call out to the $fn_name_selector_impl module for proper macro hygiene.
            [<$fn_name _selector_impl>]::$fn_name(state)
        }

        mod [<$fn_name _selector_impl>] {
            use super::*;
            use std::cell::RefCell;
            use $crate::state::utils::SelectorArg;

            // e.g. the tuple: (ArgTypeA, ArgTypeB,)
            type ArgsCacheTuple = ( $( $ArgType, )* );

            thread_local! {
                static ARGS_CACHE: RefCell<Option<ArgsCacheTuple>> = RefCell::new(None);
                static RETURNS_CACHE: RefCell<Option<$Returns>> = RefCell::new(None);
            }

            #[inline]
            pub fn $fn_name(state: $State) -> $Returns {
                $(
                    let $arg_name: $ArgType = $arg_selector(state.clone());
                )*

                let mut cache_matches = false;
                ARGS_CACHE.with(|cache| {
                    let mut cache = cache.borrow_mut();
                    if let Some(( $( ref [<cached_ $arg_name>], )* )) = *cache {
                        cache_matches = true
                            $( && SelectorArg::is_same(&$arg_name, [<cached_ $arg_name>]) )*;
                    }
                    if !cache_matches {
                        *cache = Some(( $( $arg_name.clone(), )* ));
                    }
                });

                if cache_matches {
                    let cached = RETURNS_CACHE.with(|cache| cache.borrow().clone());
                    if let Some(returns) = cached {
                        #[cfg(feature = "selector-cache-log")]
                        tracing::trace!(selector = stringify!($fn_name), "cache hit");
                        return returns;
                    }
                }

                let returns: $Returns = [<compute_ $fn_name>]($( $arg_name ),*);
                RETURNS_CACHE.with(|cache| {
                    *cache.borrow_mut() = Some(returns.clone());
                });

                #[cfg(feature = "selector-cache-log")]
                tracing::trace!(selector = stringify!($fn_name), "cache miss");

                returns
            }

            fn [<compute_ $fn_name>](
                $( $arg_name: $ArgType ),*
            ) -> $Returns $contents
        }
    }};
}
