// Copyright 2017 Dmitry Tantsur <divius.inside@gmail.com>
// Copyright 2026 The mos-tests Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Various utilities.

use std::fmt::Display;

use super::{Error, ErrorKind, Result};

/// Define an enum that is serialized as a string.
///
/// The `= Fallback` form maps unknown values to the given variant instead
/// of failing, which suits status fields that services extend over time.
macro_rules! protocol_enum {
    (@define $(#[$attr:meta])* $name:ident {
        $($(#[$iattr:meta])* $item:ident = $val:literal),+
    }) => (
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
        pub enum $name {
            $($(#[$iattr])* $item),+
        }

        impl $name {
            /// String representation used by the API.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$item => $val),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::ser::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::ser::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::de::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<$name, D::Error>
            where
                D: ::serde::de::Deserializer<'de>,
            {
                let value: String = ::serde::de::Deserialize::deserialize(deserializer)?;
                value.parse().map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    );

    {$(#[$attr:meta])* enum $name:ident = $fallback:ident {
        $($(#[$iattr:meta])* $item:ident = $val:literal),+ $(,)?
    }} => (
        protocol_enum!(@define $(#[$attr])* $name { $($(#[$iattr])* $item = $val),+ });

        impl ::std::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> ::std::result::Result<$name, $crate::Error> {
                match s {
                    $($val => Ok($name::$item),)+
                    other => {
                        warn!("Unknown {} value {:?}, treating as {:?}",
                              stringify!($name), other, $name::$fallback);
                        Ok($name::$fallback)
                    }
                }
            }
        }
    );

    {$(#[$attr:meta])* enum $name:ident {
        $($(#[$iattr:meta])* $item:ident = $val:literal),+ $(,)?
    }} => (
        protocol_enum!(@define $(#[$attr])* $name { $($(#[$iattr])* $item = $val),+ });

        impl ::std::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> ::std::result::Result<$name, $crate::Error> {
                match s {
                    $($val => Ok($name::$item),)+
                    other => Err($crate::Error::new(
                        $crate::ErrorKind::InvalidResponse,
                        format!("Unexpected {} value {:?}", stringify!($name), other),
                    )),
                }
            }
        }
    );
}

/// Generate an accessor for a field of `self.inner`.
macro_rules! transparent_property {
    ($(#[$attr:meta])* $name:ident: ref $type:ty) => (
        $(#[$attr])*
        #[inline]
        pub fn $name(&self) -> &$type {
            &self.inner.$name
        }
    );

    ($(#[$attr:meta])* $name:ident: $type:ty) => (
        $(#[$attr])*
        #[inline]
        pub fn $name(&self) -> $type {
            self.inner.$name
        }
    );
}

/// Generate a builder method adding a query filter.
macro_rules! query_filter {
    ($(#[$attr:meta])* $func:ident -> $name:ident) => (
        $(#[$attr])*
        pub fn $func<T: Into<String>>(mut self, value: T) -> Self {
            self.query.push_str(stringify!($name), value);
            self
        }
    );

    ($(#[$attr:meta])* $func:ident -> $name:ident: $type:ty) => (
        $(#[$attr])*
        pub fn $func(mut self, value: $type) -> Self {
            self.query.push(stringify!($name), value);
            self
        }
    );
}

/// Query parameters for a listing request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query(pub Vec<(String, String)>);

impl Query {
    /// Empty query.
    pub fn new() -> Query {
        Query::default()
    }

    /// Add an item to the query.
    pub fn push<K, V>(&mut self, param: K, value: V)
    where
        K: Into<String>,
        V: ToString,
    {
        self.0.push((param.into(), value.to_string()))
    }

    /// Add a string item to the query.
    pub fn push_str<K, V>(&mut self, param: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.push((param.into(), value.into()))
    }
}

/// Return exactly one item from a collection.
///
/// Fails with `ResourceNotFound` on an empty collection and with
/// `TooManyItems` when there is more than one item.
pub fn one<T, I, S1, S2>(collection: I, not_found_msg: S1, too_many_msg: S2) -> Result<T>
where
    I: IntoIterator<Item = T>,
    S1: Display,
    S2: Display,
{
    let mut iter = collection.into_iter();
    match iter.next() {
        Some(result) => {
            if iter.next().is_some() {
                Err(Error::new(ErrorKind::TooManyItems, too_many_msg.to_string()))
            } else {
                Ok(result)
            }
        }
        None => Err(Error::new(
            ErrorKind::ResourceNotFound,
            not_found_msg.to_string(),
        )),
    }
}

#[cfg(test)]
mod test {
    use super::super::ErrorKind;
    use super::{one, Query};

    protocol_enum! {
        #[doc = "Strict test enum."]
        enum Strict {
            First = "first",
            Second = "SECOND"
        }
    }

    protocol_enum! {
        #[doc = "Lenient test enum."]
        enum Lenient = Unknown {
            Known = "known",
            Unknown = "UNKNOWN"
        }
    }

    #[test]
    fn test_protocol_enum_strict() {
        assert_eq!("first".parse::<Strict>().unwrap(), Strict::First);
        assert_eq!(Strict::Second.to_string(), "SECOND");
        let err = "third".parse::<Strict>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    }

    #[test]
    fn test_protocol_enum_fallback() {
        assert_eq!("known".parse::<Lenient>().unwrap(), Lenient::Known);
        assert_eq!("whatever".parse::<Lenient>().unwrap(), Lenient::Unknown);
    }

    #[test]
    fn test_protocol_enum_serde() {
        let value: Strict = serde_json::from_str("\"SECOND\"").unwrap();
        assert_eq!(value, Strict::Second);
        assert_eq!(serde_json::to_string(&Strict::First).unwrap(), "\"first\"");
        assert!(serde_json::from_str::<Strict>("\"nope\"").is_err());
    }

    #[test]
    fn test_query() {
        let mut query = Query::new();
        assert!(query.0.is_empty());
        query.push_str("name", "stack");
        query.push("limit", 2);
        assert_eq!(
            query.0,
            vec![
                ("name".to_string(), "stack".to_string()),
                ("limit".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn test_one() {
        assert_eq!(one(vec![1], "none", "many").unwrap(), 1);
        assert_eq!(
            one(Vec::<u8>::new(), "none", "many").unwrap_err().kind(),
            ErrorKind::ResourceNotFound
        );
        assert_eq!(
            one(vec![1, 2], "none", "many").unwrap_err().kind(),
            ErrorKind::TooManyItems
        );
    }
}
