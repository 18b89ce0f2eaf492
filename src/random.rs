use crate::{
    context::{Context, DataPlugin},
    hashing::hash_str,
    type_of,
    TypeId,
};
use log::trace;
use rand::{
    distr::uniform::{SampleRange, SampleUniform},
    Rng,
    SeedableRng,
};
use rustc_hash::FxHashMap;
use std::any::Any;

/// A named random number stream. Implementations are generated with `define_rng!`.
pub trait RngId: Copy + Clone + 'static {
    type RngType: SeedableRng + Rng + 'static;
    fn get_name() -> &'static str;
}

struct RngPlugin {
    base_seed: u64,
    // Maps the `TypeId` of an `RngId` to its boxed `RngId::RngType`
    rng_map: FxHashMap<TypeId, Box<dyn Any>>,
}

impl RngPlugin {
    fn clear(&mut self) {
        self.rng_map.clear();
    }

    fn get_rng<R: RngId>(&mut self) -> &mut R::RngType {
        let base_seed = self.base_seed;
        self.rng_map
            .entry(type_of::<R>())
            // Create a new rng if it doesn't exist yet
            .or_insert_with(|| {
                trace!("creating new RNG {} (base seed={base_seed})", R::get_name());
                let seed_offset = hash_str(R::get_name());
                Box::new(R::RngType::seed_from_u64(base_seed.wrapping_add(seed_offset)))
            })
            .downcast_mut::<R::RngType>()
            .unwrap() // Will never panic as the entry was created for `R`
    }
}

impl DataPlugin for RngPlugin {
    #[allow(non_upper_case_globals)]
    const new: &'static dyn Fn() -> Self = &|| RngPlugin {
        base_seed: 0,
        rng_map: FxHashMap::default(),
    };
}

/// Gets a mutable reference to the random number generator associated with the given
/// `RngId`.
// This is a private free function so that it's not leaked to the public API.
fn get_rng<R: RngId>(context: &mut Context) -> &mut R::RngType {
    context.get_data_container_mut::<RngPlugin>().get_rng::<R>()
}

pub trait ContextRandomExt {
    /// Sets the base seed every stream is derived from. Streams created before this call are
    /// discarded so that they get re-seeded on next use.
    fn init_random(&mut self, base_seed: u64);

    /// Gets a random sample from the random number generator associated with the given
    /// `RngId` by applying the specified sampler function. If the Rng has not been used
    /// before, one will be created with the base seed you defined in `init_random`.
    fn sample<R: RngId, T>(&mut self, sampler: impl FnOnce(&mut R::RngType) -> T) -> T;

    /// Gets a random sample within the range provided by `range`
    /// using the generator associated with the given `RngId`.
    fn sample_range<R: RngId, S, T>(&mut self, range: S) -> T
    where
        S: SampleRange<T>,
        T: SampleUniform;

    /// Draws a uniform value in `[0, 1)`. Comparing this against a probability never panics,
    /// unlike `Rng::random_bool`, so rates outside `[0, 1]` degrade to never/always.
    fn sample_unit<R: RngId>(&mut self) -> f64;
}

impl ContextRandomExt for Context {
    fn init_random(&mut self, base_seed: u64) {
        trace!("initializing random module with base seed {base_seed}");
        let rng_container = self.get_data_container_mut::<RngPlugin>();
        rng_container.base_seed = base_seed;

        // Clear any existing Rngs to ensure they get re-seeded when `get_rng` is called
        rng_container.clear();
    }

    fn sample<R: RngId, T>(&mut self, sampler: impl FnOnce(&mut R::RngType) -> T) -> T {
        let rng = get_rng::<R>(self);
        sampler(rng)
    }

    fn sample_range<R: RngId, S, T>(&mut self, range: S) -> T
    where
        S: SampleRange<T>,
        T: SampleUniform,
    {
        self.sample::<R, T>(|rng| rng.random_range(range))
    }

    fn sample_unit<R: RngId>(&mut self) -> f64 {
        self.sample::<R, f64>(|rng| rng.random::<f64>())
    }
}

/// Defines a named random number stream. The stream is a `StdRng` unless another seedable
/// generator type is given.
#[macro_export]
macro_rules! define_rng {
    ($random_id:ident) => {
        $crate::define_rng!($random_id, $crate::rand::rngs::StdRng);
    };
    ($random_id:ident, $rng_type:ty) => {
        #[derive(Copy, Clone)]
        pub struct $random_id;

        impl $crate::random::RngId for $random_id {
            type RngType = $rng_type;

            fn get_name() -> &'static str {
                stringify!($random_id)
            }
        }
    };
}
#[allow(unused_imports)]
pub use define_rng;
