//! Generic invocation engine.
//!
//! A reflected call crosses one erasure boundary, confined to this module:
//! the caller's typed return storage and argument pack become a slot array
//! of `&mut dyn Any`, and the stored [`Invoker`] downcasts them back to the
//! concrete types the real function expects. Every cast is checked; a
//! mismatch is reported as [`InvokeError`] rather than corrupting memory.
//!
//! Slot layout: slot 0 is always the return slot, arguments follow in
//! declared order. `()` is the return type of a function with nothing to
//! return, so there is no separate void layout; writing `()` through a `()`
//! slot is a no-op with real semantics.
//!
//! All storage is caller-owned and stack-allocated: the return value and the
//! argument pack live in [`invoke`]'s frame, only their addresses enter the
//! slot array, and everything dies when the call returns.

use crate::class::FunctionInfo;
use crate::error::InvokeError;
use crate::registry::Reflect;
use smallvec::SmallVec;
use std::any::Any;

pub const INLINE_SLOT_CAPACITY: usize = 4;

/// Type-erased slot array for one call. Slot 0 is the return slot.
pub type ArgSlots<'a> = SmallVec<[&'a mut dyn Any; INLINE_SLOT_CAPACITY]>;

/// Type-erased adapter around a concrete member function.
///
/// Built at registration time by one of the `invoker*` adapters (or by an
/// external code generator honoring the same contract): it receives the
/// instance as `&mut dyn Any` plus the slot array, downcasts everything to
/// the signature it closed over, runs the call, and writes the result
/// through the return slot.
///
/// The instance contract belongs to the registrar. The arity adapters
/// downcast to the exact concrete type they were built for; a function
/// declared on an ancestor record that must serve several concrete classes
/// needs an invoker aware of each of them, and since `Invoker` is a plain
/// boxed closure, registration code can supply one directly.
pub type Invoker =
    Box<dyn Fn(&mut dyn Any, &mut [&mut dyn Any]) -> Result<(), InvokeError> + Send + Sync>;

/// Caller-side argument pack for [`invoke`].
///
/// Implemented for tuples of `Any` values up to arity 8. The pack owns the
/// argument storage for the duration of the call; `push_slots` borrows each
/// element into the slot array in declaration order.
pub trait InvokeArgs {
    const LEN: usize;
    fn push_slots<'a>(&'a mut self, slots: &mut ArgSlots<'a>);
}

macro_rules! impl_invoke_args {
    ($len:expr $(, $ty:ident $idx:tt)*) => {
        impl<$($ty: Any),*> InvokeArgs for ($($ty,)*) {
            const LEN: usize = $len;
            #[allow(unused_variables)]
            fn push_slots<'a>(&'a mut self, slots: &mut ArgSlots<'a>) {
                $(slots.push(&mut self.$idx);)*
            }
        }
    };
}

impl_invoke_args!(0);
impl_invoke_args!(1, A0 0);
impl_invoke_args!(2, A0 0, A1 1);
impl_invoke_args!(3, A0 0, A1 1, A2 2);
impl_invoke_args!(4, A0 0, A1 1, A2 2, A3 3);
impl_invoke_args!(5, A0 0, A1 1, A2 2, A3 3, A4 4);
impl_invoke_args!(6, A0 0, A1 1, A2 2, A3 3, A4 4, A5 5);
impl_invoke_args!(7, A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6);
impl_invoke_args!(8, A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7);

/// Call a reflected function on `instance` by name.
///
/// Resolution goes through the instance's own class record and is
/// inheritance-aware: the function may be declared on the runtime class or
/// any ancestor, nearest declaration winning. `R` must match the registered
/// return type (`()` for functions that return nothing) and the argument
/// tuple must match the declared parameters; mismatches are reported, never
/// coerced.
///
/// ```
/// # use reflect_rs::{invoke, invoker2, ClassDirectory, ClassInfo, Reflect};
/// # use std::any::Any;
/// # #[derive(Default)]
/// # struct Calc;
/// # impl Calc {
/// #     fn add(&mut self, a: i64, b: i64) -> i64 { a + b }
/// #     fn static_class() -> &'static ClassInfo {
/// #         ClassDirectory::global().get_or_register::<Calc>(
/// #             "Calc", size_of::<Calc>(), Some(ClassDirectory::root()),
/// #             |info| info.add_function("add", "i64", &["i64", "i64"], "", invoker2(Calc::add)),
/// #         )
/// #     }
/// # }
/// # impl Reflect for Calc {
/// #     fn class_info(&self) -> &'static ClassInfo { Calc::static_class() }
/// #     fn as_any(&self) -> &dyn Any { self }
/// #     fn as_any_mut(&mut self) -> &mut dyn Any { self }
/// # }
/// let mut calc = Calc;
/// let sum: i64 = invoke(&mut calc, "add", (2i64, 3i64)).unwrap();
/// assert_eq!(sum, 5);
/// ```
pub fn invoke<R, A>(instance: &mut dyn Reflect, name: &str, args: A) -> Result<R, InvokeError>
where
    R: Any + Default,
    A: InvokeArgs,
{
    let class = instance.class_info();
    let func = class
        .function(name)
        .ok_or_else(|| InvokeError::FunctionNotFound {
            class: class.name.clone(),
            function: name.to_string(),
        })?;
    dispatch(instance, func, args)
}

/// [`invoke`] for functions with no return value.
pub fn invoke_void<A>(instance: &mut dyn Reflect, name: &str, args: A) -> Result<(), InvokeError>
where
    A: InvokeArgs,
{
    invoke::<(), A>(instance, name, args)
}

/// Drive a resolved function's stored invoker, bypassing name resolution.
///
/// Return storage is zero-value-initialized (`R::default()`) in this frame;
/// the argument pack moves into this frame as well. Only addresses enter the
/// slot array, and all of it is discarded when the call returns.
pub fn dispatch<R, A>(
    instance: &mut dyn Reflect,
    func: &FunctionInfo,
    args: A,
) -> Result<R, InvokeError>
where
    R: Any + Default,
    A: InvokeArgs,
{
    if A::LEN != func.param_types.len() {
        return Err(InvokeError::ArityMismatch {
            function: func.name.clone(),
            expected: func.param_types.len(),
            got: A::LEN,
        });
    }

    let mut ret = R::default();
    let mut args = args;
    let mut slots: ArgSlots<'_> = SmallVec::new();
    slots.push(&mut ret);
    args.push_slots(&mut slots);

    (func.invoker)(instance.as_any_mut(), slots.as_mut_slice())?;

    // The slot array borrows `ret`; release it before handing the value back.
    drop(slots);
    Ok(ret)
}

macro_rules! impl_invoker_adapter {
    ($fn_name:ident $(, $ty:ident $arg:ident $idx:tt)*) => {
        /// Build an [`Invoker`] around a concrete function of the matching
        /// arity. The first parameter is the receiver; arguments pass by
        /// value (cloned out of their slots) in declared order, and the
        /// result is written through the return slot.
        pub fn $fn_name<T, $($ty,)* R, F>(f: F) -> Invoker
        where
            T: Any,
            $($ty: Any + Clone,)*
            R: Any,
            F: Fn(&mut T $(, $ty)*) -> R + Send + Sync + 'static,
        {
            Box::new(move |obj: &mut dyn Any, slots: &mut [&mut dyn Any]| {
                let instance =
                    obj.downcast_mut::<T>()
                        .ok_or(InvokeError::InstanceTypeMismatch {
                            expected: std::any::type_name::<T>(),
                        })?;
                let Some((ret_slot, _args)) = slots.split_first_mut() else {
                    return Err(InvokeError::ReturnTypeMismatch {
                        expected: std::any::type_name::<R>(),
                    });
                };
                $(
                    let $arg = _args[$idx]
                        .downcast_ref::<$ty>()
                        .ok_or(InvokeError::ArgumentTypeMismatch {
                            index: $idx,
                            expected: std::any::type_name::<$ty>(),
                        })?
                        .clone();
                )*
                let result = f(instance $(, $arg)*);
                *ret_slot
                    .downcast_mut::<R>()
                    .ok_or(InvokeError::ReturnTypeMismatch {
                        expected: std::any::type_name::<R>(),
                    })? = result;
                Ok(())
            })
        }
    };
}

impl_invoker_adapter!(invoker0);
impl_invoker_adapter!(invoker1, A0 a0 0);
impl_invoker_adapter!(invoker2, A0 a0 0, A1 a1 1);
impl_invoker_adapter!(invoker3, A0 a0 0, A1 a1 1, A2 a2 2);
impl_invoker_adapter!(invoker4, A0 a0 0, A1 a1 1, A2 a2 2, A3 a3 3);
impl_invoker_adapter!(invoker5, A0 a0 0, A1 a1 1, A2 a2 2, A3 a3 3, A4 a4 4);
impl_invoker_adapter!(invoker6, A0 a0 0, A1 a1 1, A2 a2 2, A3 a3 3, A4 a4 4, A5 a5 5);
impl_invoker_adapter!(invoker7, A0 a0 0, A1 a1 1, A2 a2 2, A3 a3 3, A4 a4 4, A5 a5 5, A6 a6 6);
impl_invoker_adapter!(invoker8, A0 a0 0, A1 a1 1, A2 a2 2, A3 a3 3, A4 a4 4, A5 a5 5, A6 a6 6, A7 a7 7);
