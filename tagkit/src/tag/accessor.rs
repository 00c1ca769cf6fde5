use crate::error::Result;

use std::borrow::Cow;

// This defines the `Accessor` trait, used to define unified getters/setters for commonly
// accessed tag values.
//
// Usage:
//
// accessor_trait! {
//     [field_name]<type, owned_type>
// }
//
// * `field_name` is the name of the method to access the field.
//
// * `type` is the return type for `Accessor::field_name`, wrapped in an `Option`.
//
// * `owned_type` is the type taken by the setter.
macro_rules! accessor_trait {
	($([$name:ident] < $ty:ty, $owned_ty:ty >),+ $(,)?) => {
		/// Provides accessors for common items
		///
		/// Every format resolves these through its own well-known keys (frame IDs, atom codes,
		/// item keys), so the same call works on any tag.
		///
		/// Note that for tag formats supporting multiple values, getters return the first
		/// occurrence, and setters **replace** the first occurrence. If multi-value support is needed,
		/// use the format-specific methods.
		///
		/// Setters can fail, as some formats are severely limited in what they can store (for
		/// example, ID3v1 only allows 30 Latin-1 characters for a title).
		pub trait Accessor {
			$(
				accessor_trait! { @GET_METHOD $name $ty }

				accessor_trait! { @SET_METHOD $name $owned_ty }

				accessor_trait! { @REMOVE_METHOD $name }
			)+
		}
	};
	(@GET_METHOD $name:ident $ret_ty:ty) => {
		paste::paste! {
			#[doc = "Returns the " $name "."]
			///
			/// For formats that support multiple definitions of the same item, this will only return the first occurrence.
			fn $name(&self) -> Option<$ret_ty>;
		}
	};
	(@SET_METHOD $name:ident $owned_ty:ty) => {
		paste::paste! {
			#[doc = "Sets the " $name "."]
			///
			/// For formats that support multiple definitions of the same item, this will replace the first
			/// occurrence, or add a new one if none exist.
			///
			/// # Errors
			///
			/// The value can't be represented in the format
			fn [<set_ $name>](&mut self, value: $owned_ty) -> Result<()>;
		}
	};
	(@REMOVE_METHOD $name:ident) => {
		paste::paste! {
			#[doc = "Removes every occurrence of the " $name "."]
			fn [<remove_ $name>](&mut self);
		}
	};
}

accessor_trait! {
	[title  ]<Cow<'_, str>, String>, [artist]<Cow<'_, str>, String>,
	[album  ]<Cow<'_, str>, String>, [genre ]<Cow<'_, str>, String>,
	[comment]<Cow<'_, str>, String>, [date  ]<Cow<'_, str>, String>,
	[track  ]<u32, u32>,             [disc  ]<u32, u32>,
}

// Shorthand for implementing the `Accessor` text methods in terms of a format's own
// `get_text`/`set_text`/`remove_text` methods, keyed by a constant.
//
// Usage:
//
// impl_text_accessors! {
//     title => TITLE_KEY,
//     artist => ARTIST_KEY,
// }
macro_rules! impl_text_accessors {
	($($name:ident => $key:expr),+ $(,)?) => {
		paste::paste! {
			$(
				fn $name(&self) -> Option<std::borrow::Cow<'_, str>> {
					self.get_text($key)
				}

				fn [<set_ $name>](&mut self, value: String) -> crate::error::Result<()> {
					self.set_text($key, value)
				}

				fn [<remove_ $name>](&mut self) {
					self.remove_text($key)
				}
			)+
		}
	};
}

pub(crate) use impl_text_accessors;
