//! In-memory `SurfaceBackend` that records every call. For tests only.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use atrium_common::types::Rect;

use crate::backend::{SurfaceBackend, SurfaceError};
use crate::events::{ScriptTag, SurfaceEvent};
use crate::surface::SurfaceSpec;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create {
        name: String,
        partition: Option<String>,
        bounds: Rect,
    },
    Destroy(String),
    SetBounds(String, Rect),
    SetVisible(String, bool),
    Reload(String),
    LoadUrl(String, String),
    SendIpc {
        name: String,
        kind: String,
        payload: serde_json::Value,
    },
    Evaluate {
        name: String,
        tag: ScriptTag,
    },
    ReleaseWindow,
}

#[derive(Debug, Clone)]
struct LiveSurface {
    spec: SurfaceSpec,
    partition: Option<String>,
    url: String,
    visible: bool,
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: RefCell<Vec<Call>>,
    live: BTreeMap<String, LiveSurface>,
    has_window: bool,
    fail_create: HashSet<String>,
    fail_destroy: HashSet<String>,
    events: RefCell<Vec<SurfaceEvent>>,
}

impl RecordingBackend {
    /// A backend with an attached window.
    pub fn new() -> Self {
        Self {
            has_window: true,
            ..Self::default()
        }
    }

    pub fn without_window() -> Self {
        Self::default()
    }

    pub fn attach_window(&mut self) {
        self.has_window = true;
    }

    pub fn has_window(&self) -> bool {
        self.has_window
    }

    pub fn fail_create(&mut self, name: &str) {
        self.fail_create.insert(name.to_string());
    }

    pub fn fail_destroy(&mut self, name: &str) {
        self.fail_destroy.insert(name.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn live_names(&self) -> Vec<String> {
        self.live.keys().cloned().collect()
    }

    pub fn partition_of(&self, name: &str) -> Option<Option<String>> {
        self.live.get(name).map(|s| s.partition.clone())
    }

    pub fn spec_of(&self, name: &str) -> Option<SurfaceSpec> {
        self.live.get(name).map(|s| s.spec.clone())
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.live.get(name).is_some_and(|s| s.visible)
    }

    pub fn set_current_url(&mut self, name: &str, url: &str) {
        if let Some(s) = self.live.get_mut(name) {
            s.url = url.to_string();
        }
    }

    /// IPC messages sent to `name`, oldest first.
    pub fn sent_to(&self, name: &str) -> Vec<(String, serde_json::Value)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::SendIpc {
                    name: n,
                    kind,
                    payload,
                } if n == name => Some((kind.clone(), payload.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn push_event(&self, event: SurfaceEvent) {
        self.events.borrow_mut().push(event);
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn live_mut(&mut self, name: &str) -> Result<&mut LiveSurface, SurfaceError> {
        self.live
            .get_mut(name)
            .ok_or_else(|| SurfaceError::Unknown(name.to_string()))
    }
}

impl SurfaceBackend for RecordingBackend {
    fn create(
        &mut self,
        spec: &SurfaceSpec,
        partition: Option<&str>,
        bounds: Rect,
    ) -> Result<(), SurfaceError> {
        if !self.has_window {
            return Err(SurfaceError::NoWindow(spec.name.clone()));
        }
        self.record(Call::Create {
            name: spec.name.clone(),
            partition: partition.map(str::to_string),
            bounds,
        });
        if self.fail_create.contains(&spec.name) || self.live.contains_key(&spec.name) {
            return Err(SurfaceError::Backend {
                name: spec.name.clone(),
                message: "create failed".into(),
            });
        }
        self.live.insert(
            spec.name.clone(),
            LiveSurface {
                spec: spec.clone(),
                partition: partition.map(str::to_string),
                url: spec.url.clone(),
                visible: true,
            },
        );
        Ok(())
    }

    fn destroy(&mut self, name: &str) -> Result<(), SurfaceError> {
        self.record(Call::Destroy(name.to_string()));
        if self.live.remove(name).is_none() {
            return Err(SurfaceError::Destroyed(name.to_string()));
        }
        if self.fail_destroy.contains(name) {
            return Err(SurfaceError::Backend {
                name: name.to_string(),
                message: "destroy failed".into(),
            });
        }
        self.events.borrow_mut().push(SurfaceEvent::Closed {
            surface: name.to_string(),
        });
        Ok(())
    }

    fn set_bounds(&mut self, name: &str, bounds: Rect) -> Result<(), SurfaceError> {
        self.record(Call::SetBounds(name.to_string(), bounds));
        self.live_mut(name).map(|_| ())
    }

    fn set_visible(&mut self, name: &str, visible: bool) -> Result<(), SurfaceError> {
        self.record(Call::SetVisible(name.to_string(), visible));
        self.live_mut(name)?.visible = visible;
        Ok(())
    }

    fn reload(&mut self, name: &str) -> Result<(), SurfaceError> {
        self.record(Call::Reload(name.to_string()));
        self.live_mut(name).map(|_| ())
    }

    fn load_url(&mut self, name: &str, url: &str) -> Result<(), SurfaceError> {
        self.record(Call::LoadUrl(name.to_string(), url.to_string()));
        self.live_mut(name)?.url = url.to_string();
        Ok(())
    }

    fn current_url(&self, name: &str) -> Option<String> {
        self.live.get(name).map(|s| s.url.clone())
    }

    fn send_ipc(
        &self,
        name: &str,
        kind: &str,
        payload: &serde_json::Value,
    ) -> Result<(), SurfaceError> {
        if !self.live.contains_key(name) {
            return Err(SurfaceError::Unknown(name.to_string()));
        }
        self.record(Call::SendIpc {
            name: name.to_string(),
            kind: kind.to_string(),
            payload: payload.clone(),
        });
        Ok(())
    }

    fn evaluate(&self, name: &str, _script: &str, tag: ScriptTag) -> Result<(), SurfaceError> {
        if !self.live.contains_key(name) {
            return Err(SurfaceError::Unknown(name.to_string()));
        }
        self.record(Call::Evaluate {
            name: name.to_string(),
            tag,
        });
        Ok(())
    }

    fn release_window(&mut self) {
        self.record(Call::ReleaseWindow);
        self.has_window = false;
    }

    fn drain_events(&self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}
