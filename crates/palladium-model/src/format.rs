//! Model format registration and host integration.
//!
//! A [`ModelFormat`] pairs a [`Codec`] with the editor-facing description of
//! the format: feature flags, an export [`Action`], and the activation hooks
//! that put that action into the host's menus.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::codec::{Codec, PalladiumCodec, CODEC_ID};
use crate::error::RegistryError;

/// Menu path the export action is added to.
pub const EXPORT_MENU: &str = "file.export";

/// Metadata of the plugin that provides the Palladium format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub id: &'static str,
    pub title: &'static str,
    pub author: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub version: &'static str,
    /// Host variants the plugin runs on ("desktop", "web", or "both").
    pub variant: &'static str,
}

/// The Palladium plugin.
pub const PLUGIN: PluginInfo = PluginInfo {
    id: "palladium",
    title: "Palladium",
    author: "Lucraft",
    description: "Export/import for Palladium models",
    icon: "looks_3",
    version: "0.0.1",
    variant: "both",
};

/// A user-invokable host action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub category: String,
}

impl Action {
    /// Creates an action.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            category: category.into(),
        }
    }
}

/// Editor capabilities a format enables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatFeatures {
    pub show_on_start_screen: bool,
    pub box_uv: bool,
    pub optional_box_uv: bool,
    pub single_texture: bool,
    pub bone_rig: bool,
    pub centered_grid: bool,
    pub rotate_cubes: bool,
    pub integer_size: bool,
    pub locators: bool,
    pub canvas_limit: bool,
    pub rotation_limit: bool,
    pub display_mode: bool,
    pub animation_mode: bool,
}

impl FormatFeatures {
    /// Features of the Palladium format: box-UV, single texture, bone rig,
    /// unrotated cubes, and fractional sizes.
    pub const PALLADIUM: FormatFeatures = FormatFeatures {
        show_on_start_screen: true,
        box_uv: true,
        optional_box_uv: false,
        single_texture: true,
        bone_rig: true,
        centered_grid: true,
        rotate_cubes: false,
        integer_size: false,
        locators: false,
        canvas_limit: false,
        rotation_limit: false,
        display_mode: true,
        animation_mode: false,
    };

    /// Names of the enabled features.
    pub fn enabled(&self) -> Vec<&'static str> {
        [
            ("show_on_start_screen", self.show_on_start_screen),
            ("box_uv", self.box_uv),
            ("optional_box_uv", self.optional_box_uv),
            ("single_texture", self.single_texture),
            ("bone_rig", self.bone_rig),
            ("centered_grid", self.centered_grid),
            ("rotate_cubes", self.rotate_cubes),
            ("integer_size", self.integer_size),
            ("locators", self.locators),
            ("canvas_limit", self.canvas_limit),
            ("rotation_limit", self.rotation_limit),
            ("display_mode", self.display_mode),
            ("animation_mode", self.animation_mode),
        ]
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect()
    }
}

/// The UI side of the editor that formats plug into.
pub trait Host {
    /// Adds `action` to the menu at `menu_path`.
    fn add_action(&mut self, action: &Action, menu_path: &str);

    /// Removes the action with the given id from every menu.
    fn remove_action(&mut self, action_id: &str);
}

/// A minimal in-memory [`Host`] that records menu entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuBar {
    entries: Vec<(String, Action)>,
}

impl MenuBar {
    /// Creates an empty menu bar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions registered under `menu_path`, in insertion order.
    pub fn actions(&self, menu_path: &str) -> Vec<&Action> {
        self.entries
            .iter()
            .filter(|(path, _)| path == menu_path)
            .map(|(_, action)| action)
            .collect()
    }

    /// All `(menu path, action)` entries.
    pub fn entries(&self) -> &[(String, Action)] {
        &self.entries
    }
}

impl Host for MenuBar {
    fn add_action(&mut self, action: &Action, menu_path: &str) {
        let exists = self
            .entries
            .iter()
            .any(|(path, a)| path == menu_path && a.id == action.id);
        if !exists {
            self.entries.push((menu_path.to_string(), action.clone()));
        }
    }

    fn remove_action(&mut self, action_id: &str) {
        self.entries.retain(|(_, a)| a.id != action_id);
    }
}

/// A model format: a codec plus its editor-facing description.
#[derive(Debug)]
pub struct ModelFormat {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub features: FormatFeatures,
    codec: Box<dyn Codec>,
    export_action: Action,
}

impl ModelFormat {
    /// The Palladium entity model format.
    pub fn palladium() -> Self {
        Self {
            id: CODEC_ID,
            name: "Palladium Entity Model",
            description: "Entity model for the Palladium Mod",
            icon: "icon-format_java",
            features: FormatFeatures::PALLADIUM,
            codec: Box::new(PalladiumCodec),
            export_action: Action::new(
                "export_palladium_entity",
                "Export Palladium Entity Model",
                "icon-format_java",
                "file",
            ),
        }
    }

    /// The format's codec.
    pub fn codec(&self) -> &dyn Codec {
        self.codec.as_ref()
    }

    /// The action that exports the open model with this format.
    pub fn export_action(&self) -> &Action {
        &self.export_action
    }

    /// Called when the host switches to this format.
    pub fn activate(&self, host: &mut dyn Host) {
        debug!(format = self.id, "activating format");
        host.add_action(&self.export_action, EXPORT_MENU);
    }

    /// Called when the host switches away from this format.
    pub fn deactivate(&self, host: &mut dyn Host) {
        debug!(format = self.id, "deactivating format");
        host.remove_action(&self.export_action.id);
    }
}

fn builtin_formats() -> Vec<ModelFormat> {
    vec![ModelFormat::palladium()]
}

/// Registry of model formats by id and save extension.
#[derive(Debug, Default)]
pub struct FormatRegistry {
    formats: Vec<ModelFormat>,
    by_id: HashMap<&'static str, usize>,
    by_extension: HashMap<&'static str, usize>,
}

impl FormatRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in formats.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for format in builtin_formats() {
            let id = format.id;
            let registered = registry.register(format);
            if let Err(err) = &registered {
                warn!(format = id, %err, "built-in format not registered");
            }
            debug_assert!(registered.is_ok(), "conflicting built-in format {}", id);
        }
        registry
    }

    /// Registers a format.
    pub fn register(&mut self, format: ModelFormat) -> Result<(), RegistryError> {
        if self.by_id.contains_key(format.id) {
            return Err(RegistryError::AlreadyRegistered(format.id.to_string()));
        }
        let extension = format.codec().extension();
        if let Some(&existing) = self.by_extension.get(extension) {
            return Err(RegistryError::ExtensionConflict {
                extension: extension.to_string(),
                existing: self.formats[existing].id.to_string(),
            });
        }

        let slot = self.formats.len();
        self.by_id.insert(format.id, slot);
        self.by_extension.insert(extension, slot);
        self.formats.push(format);
        Ok(())
    }

    /// Looks up a format by id.
    pub fn get(&self, id: &str) -> Result<&ModelFormat, RegistryError> {
        self.by_id
            .get(id)
            .map(|&slot| &self.formats[slot])
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Finds the format that loads files with `extension`.
    pub fn for_extension(&self, extension: &str) -> Result<&ModelFormat, RegistryError> {
        self.formats
            .iter()
            .find(|format| format.codec().accepts_extension(extension))
            .ok_or_else(|| RegistryError::NotFound(format!(".{}", extension)))
    }

    /// Iterates registered formats in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ModelFormat> {
        self.formats.iter()
    }

    /// Number of registered formats.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Returns true if no formats are registered.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}
