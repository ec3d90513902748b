// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;
use core::hash::Hash;

use hashbrown::{Equivalent, HashMap};

use crate::config::EngineConfig;
use crate::engine::TransformEngine;

/// Independent [`TransformEngine`]s keyed by surface identifier.
///
/// Each surface (a canvas, a tab, a split pane) gets its own engine with its
/// own state, tracked shapes and listeners. Engines created through
/// [`get_or_create`](Self::get_or_create) start from the registry's config.
pub struct EngineRegistry<Id, K = String> {
    config: EngineConfig,
    engines: HashMap<Id, TransformEngine<K>>,
}

impl<Id, K> fmt::Debug for EngineRegistry<Id, K>
where
    Id: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("config", &self.config)
            .field("surfaces", &self.engines.keys().collect::<alloc::vec::Vec<_>>())
            .finish()
    }
}

impl<Id, K> Default for EngineRegistry<Id, K> {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl<Id, K> EngineRegistry<Id, K> {
    /// Creates an empty registry using the default engine configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry whose new engines use `config`.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config: config.normalized(),
            engines: HashMap::new(),
        }
    }

    /// Configuration applied to newly created engines.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of live engines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Returns `true` if no engine exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Iterates the surface identifiers in arbitrary order.
    pub fn ids(&self) -> impl Iterator<Item = &Id> + '_ {
        self.engines.keys()
    }
}

impl<Id, K> EngineRegistry<Id, K>
where
    Id: Eq + Hash,
{
    /// Returns the engine for `id`, creating it on first use.
    pub fn get_or_create(&mut self, id: Id) -> &mut TransformEngine<K> {
        let config = self.config;
        self.engines.entry(id).or_insert_with(|| {
            tracing::debug!("creating transform engine");
            TransformEngine::with_config(config)
        })
    }

    /// Returns the engine for `id`, if any.
    #[must_use]
    pub fn get<Q>(&self, id: &Q) -> Option<&TransformEngine<K>>
    where
        Q: ?Sized + Hash + Equivalent<Id>,
    {
        self.engines.get(id)
    }

    /// Returns the engine for `id` mutably, if any.
    pub fn get_mut<Q>(&mut self, id: &Q) -> Option<&mut TransformEngine<K>>
    where
        Q: ?Sized + Hash + Equivalent<Id>,
    {
        self.engines.get_mut(id)
    }

    /// Inserts an externally built engine, returning the one it replaces.
    pub fn insert(&mut self, id: Id, engine: TransformEngine<K>) -> Option<TransformEngine<K>> {
        self.engines.insert(id, engine)
    }

    /// Removes and returns the engine for `id`.
    pub fn remove<Q>(&mut self, id: &Q) -> Option<TransformEngine<K>>
    where
        Q: ?Sized + Hash + Equivalent<Id>,
    {
        self.engines.remove(id)
    }

    /// Returns `true` if an engine exists for `id`.
    #[must_use]
    pub fn contains<Q>(&self, id: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<Id>,
    {
        self.engines.contains_key(id)
    }
}
