/*!

The `Context` owns every piece of simulation state. State is stored in "data plugins": any
`'static` type that knows how to construct its own empty value via `DataPlugin::new`. A plugin
is created lazily the first time it is requested mutably, so modules never have to register
their data up front.

*/

use crate::type_of;
use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};

/// A type that can be stored in a `Context`. The hitch is it needs to be `'static`, which
/// the population, the random number streams, and most plain containers satisfy.
pub trait DataPlugin: Any + Sized {
    /// A constant reference to a constructor for the empty plugin.
    #[allow(non_upper_case_globals)]
    const new: &'static dyn Fn() -> Self;
}

impl<T: 'static> DataPlugin for Vec<T> {
    #[allow(non_upper_case_globals)]
    const new: &'static dyn Fn() -> Self = &Vec::<T>::new;
}

pub struct Context {
    // This is actually a `HashMap<TypeId, Box<dyn DataPlugin>>` but must be declared this way
    // since `DataPlugin` is not object safe.
    data_plugins: FxHashMap<TypeId, Box<dyn Any>>,
}

impl Context {
    pub fn new() -> Self {
        Context {
            data_plugins: FxHashMap::default(),
        }
    }

    /// Returns a mutable reference for the data container for `T`, creating it if it doesn't exist yet.
    pub fn get_data_container_mut<T: DataPlugin>(&mut self) -> &mut T {
        self.data_plugins
            .entry(type_of::<T>())
            .or_insert_with(|| Box::new((<T as DataPlugin>::new)()))
            .downcast_mut::<T>()
            .unwrap() // Will never panic as data container has the matching type
    }

    /// Returns a reference to the data container for `T` if it exists.
    /// If you need a mutable reference or lazy instantiation, use `Context::get_data_container_mut()`.
    pub fn get_data_container<T: DataPlugin>(&self) -> Option<&T> {
        self.data_plugins
            .get(&type_of::<T>())
            .and_then(|data| data.downcast_ref::<T>())
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
