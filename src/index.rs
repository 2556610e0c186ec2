macro_rules! make_index {
    ($(#[$meta:meta])* $vis:vis $name:ident) => {
        $(#[$meta])*
        #[derive(
            Copy,
            Clone,
            Debug,
            Hash,
            Eq,
            PartialEq,
            Ord,
            PartialOrd,
        )]
        $vis struct $name(u32);

        impl $name {
            /// Create new index from `usize`.
            #[inline(always)]
            $vis fn new(x: usize) -> Self {
                debug_assert!(x < u32::MAX as usize);
                Self(x as u32)
            }

            /// Returns the index as `usize`.
            #[inline(always)]
            $vis fn index(&self) -> usize { self.0 as usize }

            /// Create the reserved "no index" sentinel.
            #[inline(always)]
            $vis fn invalid() -> Self { Self(u32::MAX) }

            /// Returns `true` if the index is not the sentinel.
            #[inline(always)]
            $vis fn is_valid(&self) -> bool { self.0 < u32::MAX }
        }

        impl ::std::default::Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl ::std::convert::From<usize> for $name {
            #[inline(always)]
            fn from(x: usize) -> Self {
                Self::new(x)
            }
        }

        impl ::std::convert::From<u32> for $name {
            #[inline(always)]
            fn from(x: u32) -> Self {
                Self(x)
            }
        }

        impl ::std::convert::From<$name> for usize {
            #[inline(always)]
            fn from(x: $name) -> Self {
                x.index()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use make_index;

#[cfg(test)]
mod test {
    #[test]
    fn make_index() {
        make_index!(TestIndex);

        let idx = TestIndex::new(42);

        assert_eq!(idx.index(), 42);
        assert!(idx.is_valid());
        assert!(!TestIndex::invalid().is_valid());
        assert_eq!(TestIndex::default(), TestIndex::invalid());
        assert_eq!(TestIndex::from(42_u32), idx);
        assert_eq!(TestIndex::from(42_usize), idx);
        assert_eq!(usize::from(idx), 42_usize);
        assert_eq!(format!("{:?}", idx), "TestIndex(42)".to_string());
        assert_eq!(format!("{}", idx), "42".to_string());
    }
}
