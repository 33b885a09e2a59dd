use reflect_rs::{
    ClassDirectory, ClassInfo, InvokeError, Reflect, invoke, invoke_void, invoker0, invoker1,
    invoker2,
};
use std::any::Any;

// Animal -> Dog hierarchy: Dog overrides speak(), inherits legs(), and adds
// fetch(). Mirrors the classic shadowing and delegation cases.

#[derive(Default)]
struct Animal {
    legs: i64,
}

#[derive(Default)]
struct Dog {
    animal: Animal,
    fetched: i64,
}

fn animal_class() -> &'static ClassInfo {
    ClassDirectory::global().get_or_register::<Animal>(
        "Animal",
        size_of::<Animal>(),
        Some(ClassDirectory::root()),
        |info| {
            info.add_function("speak", "i64", &[], "", invoker0(|_: &mut Animal| 1i64));
            // An inherited function shared by several concrete classes needs
            // an invoker aware of each of them; the raw Invoker contract
            // allows that where the arity adapters do not.
            info.add_function(
                "legs",
                "i64",
                &[],
                "",
                Box::new(|obj: &mut dyn Any, slots: &mut [&mut dyn Any]| {
                    let legs = if let Some(animal) = obj.downcast_ref::<Animal>() {
                        animal.legs
                    } else if let Some(dog) = obj.downcast_ref::<Dog>() {
                        dog.animal.legs
                    } else {
                        return Err(InvokeError::InstanceTypeMismatch { expected: "Animal" });
                    };
                    let Some((ret_slot, _)) = slots.split_first_mut() else {
                        return Err(InvokeError::ReturnTypeMismatch { expected: "i64" });
                    };
                    *ret_slot
                        .downcast_mut::<i64>()
                        .ok_or(InvokeError::ReturnTypeMismatch { expected: "i64" })? = legs;
                    Ok(())
                }),
            );
        },
    )
}

fn dog_class() -> &'static ClassInfo {
    ClassDirectory::global().get_or_register::<Dog>(
        "Dog",
        size_of::<Dog>(),
        Some(animal_class()),
        |info| {
            info.add_function("speak", "i64", &[], "", invoker0(|_: &mut Dog| 2i64));
            info.add_function(
                "fetch",
                "()",
                &["i64"],
                "",
                invoker1(|d: &mut Dog, count: i64| {
                    d.fetched += count;
                }),
            );
            info.add_function(
                "add",
                "i64",
                &["i64", "i64"],
                "",
                invoker2(|_: &mut Dog, a: i64, b: i64| a + b),
            );
            info.add_function(
                "fetched",
                "i64",
                &[],
                "",
                invoker0(|d: &mut Dog| d.fetched),
            );
        },
    )
}

impl Reflect for Animal {
    fn class_info(&self) -> &'static ClassInfo {
        animal_class()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Reflect for Dog {
    fn class_info(&self) -> &'static ClassInfo {
        dog_class()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[test]
fn test_invoke_with_arguments_and_return() {
    let mut dog = Dog::default();
    let sum: i64 = invoke(&mut dog, "add", (2i64, 3i64)).unwrap();
    assert_eq!(sum, 5);
}

#[test]
fn test_override_shadows_base() {
    let mut dog = Dog::default();
    let voice: i64 = invoke(&mut dog, "speak", ()).unwrap();
    assert_eq!(voice, 2);

    let mut animal = Animal { legs: 4 };
    let voice: i64 = invoke(&mut animal, "speak", ()).unwrap();
    assert_eq!(voice, 1);
}

#[test]
fn test_inherited_function_resolves_through_chain() {
    let mut dog = Dog {
        animal: Animal { legs: 4 },
        fetched: 0,
    };
    let legs: i64 = invoke(&mut dog, "legs", ()).unwrap();
    assert_eq!(legs, 4);

    let mut animal = Animal { legs: 6 };
    let legs: i64 = invoke(&mut animal, "legs", ()).unwrap();
    assert_eq!(legs, 6);
}

#[test]
fn test_void_invocation_mutates_state() {
    let mut dog = Dog::default();
    invoke_void(&mut dog, "fetch", (3i64,)).unwrap();
    invoke_void(&mut dog, "fetch", (2i64,)).unwrap();
    let fetched: i64 = invoke(&mut dog, "fetched", ()).unwrap();
    assert_eq!(fetched, 5);
}

#[test]
fn test_missing_function_is_reported_not_fatal() {
    let mut dog = Dog::default();
    let err = invoke::<i64, _>(&mut dog, "missing", ()).unwrap_err();
    assert_eq!(
        err,
        InvokeError::FunctionNotFound {
            class: "Dog".to_string(),
            function: "missing".to_string(),
        }
    );

    // The instance is still usable afterward.
    let sum: i64 = invoke(&mut dog, "add", (1i64, 1i64)).unwrap();
    assert_eq!(sum, 2);
}

#[test]
fn test_resolution_uses_runtime_class_through_dyn() {
    let mut dog = Dog::default();
    let reflected: &mut dyn Reflect = &mut dog;
    // Even through the erased handle, Dog's override wins.
    let voice: i64 = invoke(reflected, "speak", ()).unwrap();
    assert_eq!(voice, 2);
}

#[test]
fn test_mismatches_are_errors_not_corruption() {
    let mut dog = Dog::default();

    let err = invoke::<i64, _>(&mut dog, "add", (2i64,)).unwrap_err();
    assert!(matches!(err, InvokeError::ArityMismatch { expected: 2, got: 1, .. }));

    let err = invoke::<i64, _>(&mut dog, "add", (2i64, "three".to_string())).unwrap_err();
    assert!(matches!(err, InvokeError::ArgumentTypeMismatch { index: 1, .. }));

    let err = invoke::<String, _>(&mut dog, "add", (2i64, 3i64)).unwrap_err();
    assert!(matches!(err, InvokeError::ReturnTypeMismatch { .. }));
}

#[test]
fn test_function_metadata_survives_registration() {
    let func = dog_class().function("add").unwrap();
    assert_eq!(func.return_type, "i64");
    assert_eq!(func.param_types, vec!["i64", "i64"]);
}
