//! Session
//!
//! One explicitly constructed handle per working session: it owns the store,
//! one interface per database kind, the link policy and the render settings.
//! Nothing is shared globally; dropping the session ends it.

use crate::config::{DendriteConfig, RenderConfig};
use crate::error::StoreError;
use crate::interface::{Interface, NoteEdit};
use crate::link::{link, LinkPolicy};
use crate::store::{ChangeSummary, RecordStore, Store, StoreRecords};
use crate::tree::Scaffold;
use crate::types::{DatabaseKind, NodeRef, NoteId};
use crate::views::{render_interface, ViewMode};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct Session {
    store: Store,
    interfaces: [Interface; 3],
    policy: LinkPolicy,
    render: RenderConfig,
}

impl Session {
    pub fn new(store: Store) -> Self {
        Self::with_settings(store, LinkPolicy::default(), RenderConfig::default())
    }

    pub fn with_config(store: Store, config: &DendriteConfig) -> Self {
        Self::with_settings(store, config.links.policy(), config.render)
    }

    pub fn with_settings(store: Store, policy: LinkPolicy, render: RenderConfig) -> Self {
        let interfaces = DatabaseKind::ALL.map(|kind| Interface::new(kind, &store));
        Self {
            store,
            interfaces,
            policy,
            render,
        }
    }

    /// Load through `backend` and start a session over the result.
    #[instrument(skip(backend, config))]
    pub fn open<B: RecordStore>(backend: &B, config: &DendriteConfig) -> Result<Self, StoreError> {
        let store = backend.load()?;
        info!(notes = store.note_count(), "Session opened");
        Ok(Self::with_config(store, config))
    }

    /// Write the current state through `backend`.
    pub fn save<B: RecordStore>(&self, backend: &B) -> Result<(), StoreError> {
        backend.save(&self.store)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn into_store(self) -> Store {
        self.store
    }

    pub fn interface(&self, kind: DatabaseKind) -> &Interface {
        &self.interfaces[kind.index()]
    }

    pub fn policy(&self) -> &LinkPolicy {
        &self.policy
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    pub fn open_node(&mut self, kind: DatabaseKind, path: &str) -> Result<NodeRef, StoreError> {
        self.interfaces[kind.index()].open_node(&self.store, path)
    }

    pub fn open_note(&mut self, kind: DatabaseKind, path: &str) -> Result<NoteId, StoreError> {
        self.interfaces[kind.index()].open_note(&self.store, path)
    }

    pub fn create_note(
        &mut self,
        kind: DatabaseKind,
        name: &str,
        content: &str,
        references: &[String],
    ) -> Result<NoteId, StoreError> {
        self.interfaces[kind.index()].create_note(&mut self.store, name, content, references)
    }

    pub fn edit_note(&mut self, kind: DatabaseKind, edit: &NoteEdit) -> Result<NoteId, StoreError> {
        let options = self.render.reconcile_options();
        self.interfaces[kind.index()].edit_note(&mut self.store, edit, options)
    }

    pub fn rename_node(&mut self, kind: DatabaseKind, path: &str, new_name: &str) -> Result<NodeRef, StoreError> {
        self.interfaces[kind.index()].rename_node(&mut self.store, path, new_name)
    }

    pub fn generate_scaffolding(
        &mut self,
        kind: DatabaseKind,
        parent_path: &str,
        scaffold: &Scaffold,
    ) -> Result<usize, StoreError> {
        self.interfaces[kind.index()].generate_scaffolding(&mut self.store, parent_path, scaffold)
    }

    /// Link `a_ref` in the `a` interface with `b_ref` in the `b` interface.
    pub fn link(
        &mut self,
        a: DatabaseKind,
        a_ref: &str,
        b: DatabaseKind,
        b_ref: &str,
    ) -> Result<bool, StoreError> {
        link(
            &mut self.store,
            &self.policy,
            (&self.interfaces[a.index()], a_ref),
            (&self.interfaces[b.index()], b_ref),
        )
    }

    pub fn render(&self, kind: DatabaseKind, mode: ViewMode) -> String {
        self.render_with_budget(kind, mode, self.render.max_interface_length)
    }

    pub fn render_with_budget(&self, kind: DatabaseKind, mode: ViewMode, max_length: usize) -> String {
        render_interface(
            &self.store,
            self.interface(kind),
            mode,
            max_length,
            self.render.schema_priority,
        )
    }

    pub fn changes(&self) -> ChangeSummary {
        self.store.changes()
    }

    pub fn records(&self) -> StoreRecords {
        self.store.to_records()
    }
}
