// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Session-scoped cache for the last active diagram per project.
//!
//! The cache is advisory: a missing or unreadable cache is an empty cache, and a write failure is
//! logged and dropped. It is injected into the selection controller as a trait so selection stays
//! testable without any ambient state.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::model::{ProjectId, UserId};

pub trait SessionCache {
    fn last_active(&self, project_id: &ProjectId) -> Option<String>;

    fn set_last_active(&self, project_id: &ProjectId, diagram_id: &str);

    /// Called when switching projects; the old project's entry is dropped.
    fn clear_last_active(&self, project_id: &ProjectId);
}

/// Purely in-process cache for tests and demo mode.
#[derive(Debug, Default)]
pub struct MemorySessionCache {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemorySessionCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionCache for MemorySessionCache {
    fn last_active(&self, project_id: &ProjectId) -> Option<String> {
        let entries = self.entries.lock().expect("session cache lock poisoned");
        entries.get(&project_id.to_string()).cloned()
    }

    fn set_last_active(&self, project_id: &ProjectId, diagram_id: &str) {
        let mut entries = self.entries.lock().expect("session cache lock poisoned");
        entries.insert(project_id.to_string(), diagram_id.to_owned());
    }

    fn clear_last_active(&self, project_id: &ProjectId) {
        let mut entries = self.entries.lock().expect("session cache lock poisoned");
        entries.remove(&project_id.to_string());
    }
}

/// Temp-file cache keyed per user, so restarting Proteus within the same machine session resumes
/// the last diagram. One JSON object mapping project id to diagram id.
#[derive(Debug, Clone)]
pub struct FileSessionCache {
    path: PathBuf,
}

impl FileSessionCache {
    pub fn for_user(user_id: &UserId) -> Self {
        let mut path = std::env::temp_dir();
        path.push(format!("proteus-session-{user_id}.json"));
        Self { path }
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return BTreeMap::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                log::debug!("ignoring unreadable session cache {:?}: {err}", self.path);
                BTreeMap::new()
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) {
        let raw = match serde_json::to_string(entries) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("session cache serialize failed: {err}");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, raw) {
            log::warn!("session cache write to {:?} failed: {err}", self.path);
        }
    }
}

impl SessionCache for FileSessionCache {
    fn last_active(&self, project_id: &ProjectId) -> Option<String> {
        self.read_entries().get(&project_id.to_string()).cloned()
    }

    fn set_last_active(&self, project_id: &ProjectId, diagram_id: &str) {
        let mut entries = self.read_entries();
        entries.insert(project_id.to_string(), diagram_id.to_owned());
        self.write_entries(&entries);
    }

    fn clear_last_active(&self, project_id: &ProjectId) {
        let mut entries = self.read_entries();
        if entries.remove(&project_id.to_string()).is_some() {
            self.write_entries(&entries);
        }
    }
}
