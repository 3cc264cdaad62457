//! Typed accessors
//!
//! Fixed-codec shorthands over [`SaveStore::get`], [`SaveStore::get_or_add`]
//! and [`SaveStore::set`].

use crate::codec::{
    Bool, Byte, Float32, Float64, Int16, Int32, Int64, UInt16, UInt32, UInt64, Utf16Le, Utf8,
};

use super::SaveStore;

macro_rules! typed_accessors {
    ($($ty:ty => $codec:ident, $get:ident, $get_or_add:ident, $set:ident;)*) => {
        impl SaveStore {
            $(
                #[doc = concat!("Read a `", stringify!($ty), "`, or `default` if missing or undecodable")]
                pub fn $get(&self, key: &str, default: $ty) -> $ty {
                    self.get(key, $codec, default)
                }

                #[doc = concat!("Read a `", stringify!($ty), "`, inserting `default` if absent")]
                pub fn $get_or_add(&self, key: &str, default: $ty) -> $ty {
                    self.get_or_add(key, $codec, default, $codec)
                }

                #[doc = concat!("Store a `", stringify!($ty), "` (in memory only)")]
                pub fn $set(&self, key: &str, value: $ty) {
                    // Fixed-width encoders never fail
                    let _ = self.set(key, $codec, &value);
                }
            )*
        }
    };
}

typed_accessors! {
    i16 => Int16, get_i16, get_or_add_i16, set_i16;
    i32 => Int32, get_i32, get_or_add_i32, set_i32;
    i64 => Int64, get_i64, get_or_add_i64, set_i64;
    u8 => Byte, get_u8, get_or_add_u8, set_u8;
    u16 => UInt16, get_u16, get_or_add_u16, set_u16;
    u32 => UInt32, get_u32, get_or_add_u32, set_u32;
    u64 => UInt64, get_u64, get_or_add_u64, set_u64;
    f32 => Float32, get_f32, get_or_add_f32, set_f32;
    f64 => Float64, get_f64, get_or_add_f64, set_f64;
    bool => Bool, get_bool, get_or_add_bool, set_bool;
}

impl SaveStore {
    /// Read UTF-8 text, or `default` if missing or undecodable
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.get(key, Utf8, default.to_string())
    }

    /// Read UTF-8 text, inserting `default` if absent
    pub fn get_or_add_string(&self, key: &str, default: &str) -> String {
        self.get_or_add(key, Utf8, default.to_string(), Utf8)
    }

    /// Store UTF-8 text (in memory only)
    pub fn set_string(&self, key: &str, value: &str) {
        let _ = self.set(key, Utf8, value);
    }

    /// Read UTF-16LE text, or `default` if missing or undecodable
    pub fn get_ustring(&self, key: &str, default: &str) -> String {
        self.get(key, Utf16Le, default.to_string())
    }

    /// Read UTF-16LE text, inserting `default` if absent
    pub fn get_or_add_ustring(&self, key: &str, default: &str) -> String {
        self.get_or_add(key, Utf16Le, default.to_string(), Utf16Le)
    }

    /// Store UTF-16LE text (in memory only)
    pub fn set_ustring(&self, key: &str, value: &str) {
        let _ = self.set(key, Utf16Le, value);
    }
}
