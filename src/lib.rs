//! Runtime type-reflection registry.
//!
//! Lets a program discover, at execution time, the fields and callable
//! members of a class hierarchy that is otherwise only known at compile
//! time, and invoke those members generically through type-erased argument
//! passing.
//!
//! ## Architecture
//!
//! - [`meta`] - annotation parsing: raw comma-separated metadata strings
//!   become [`AttributeSet`] key/value maps
//! - [`class`] - per-class metadata records: [`Property`], [`FunctionInfo`],
//!   and the [`ClassInfo`] node with inheritance-aware lookup
//! - [`registry`] - the process-wide [`ClassDirectory`] of `&'static` class
//!   records, rooted at a universal `"Object"` record, plus the [`Reflect`]
//!   self-reporting trait
//! - [`invoke`](mod@invoke) - the generic invocation engine: type-erased
//!   slot arrays, [`Invoker`] adapters, and [`invoke`](invoke::invoke)
//! - [`error`] - the [`InvokeError`] taxonomy
//!
//! ## Registration
//!
//! Registration is plain function calls, so it can be written by hand or by
//! an external code generator. The conventional shape mirrors a lazily
//! created per-class record:
//!
//! ```
//! use reflect_rs::{invoke, invoker2, ClassDirectory, ClassInfo, Reflect};
//! use std::any::Any;
//!
//! #[derive(Default)]
//! struct Monster {
//!     health: i64,
//! }
//!
//! impl Monster {
//!     fn heal(&mut self, amount: i64, cap: i64) -> i64 {
//!         self.health = (self.health + amount).min(cap);
//!         self.health
//!     }
//!
//!     fn static_class() -> &'static ClassInfo {
//!         ClassDirectory::global().get_or_register::<Monster>(
//!             "Monster",
//!             size_of::<Monster>(),
//!             Some(ClassDirectory::root()),
//!             |info| {
//!                 info.add_property(
//!                     "health",
//!                     "i64",
//!                     std::mem::offset_of!(Monster, health),
//!                     "EditAnywhere, Category = Combat",
//!                 );
//!                 info.add_function("heal", "i64", &["i64", "i64"], "", invoker2(Monster::heal));
//!             },
//!         )
//!     }
//! }
//!
//! impl Reflect for Monster {
//!     fn class_info(&self) -> &'static ClassInfo {
//!         Monster::static_class()
//!     }
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//!     fn as_any_mut(&mut self) -> &mut dyn Any {
//!         self
//!     }
//! }
//!
//! let mut monster = Monster { health: 10 };
//! let health: i64 = invoke(&mut monster, "heal", (50i64, 40i64)).unwrap();
//! assert_eq!(health, 40);
//!
//! let prop = monster.class_info().property("health").unwrap();
//! assert_eq!(prop.meta.value("Category"), Some("Combat"));
//! ```
//!
//! ## Error Handling
//!
//! - Name lookups on a record return `Option`; a miss is normal, not fatal.
//! - Invocation returns [`InvokeError`]: a missing function, and the arity
//!   and type mismatches the checked `dyn Any` slots can detect. No panics,
//!   no coercion between mismatched types.
//!
//! ## Concurrency
//!
//! Invocation is a plain synchronous call on the caller's thread. Class
//! records are written once, before publication, and read-only afterward;
//! concurrent first access is resolved by the directory (see
//! [`ClassDirectory::get_or_register`]). Instance data mutated through
//! reflected functions is protected by whatever discipline the instance's
//! own type imposes.

pub mod class;
pub mod error;
pub mod invoke;
pub mod meta;
pub mod registry;

pub use class::{ClassInfo, FunctionInfo, Property};
pub use error::InvokeError;
pub use invoke::{
    ArgSlots, INLINE_SLOT_CAPACITY, InvokeArgs, Invoker, dispatch, invoke, invoke_void, invoker0,
    invoker1, invoker2, invoker3, invoker4, invoker5, invoker6, invoker7, invoker8,
};
pub use meta::{AttributeSet, parse_parameter_list};
pub use registry::{ClassDirectory, Reflect};
