//! Command-line interface for inspecting profiles without the game
//!
//! Supports:
//! - Listing saved profiles
//! - Printing a profile's hotkeys
//! - Checking a profile file for entries the plugin would drop
//! - Previewing how a profile name gets normalized
//! - Listing key names usable in chords

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use equip_hotkeys::keys::registry;
use equip_hotkeys::persist::{GearIr, HotkeysIr};

/// Inspect equip-hotkeys profiles
#[derive(Parser, Debug)]
#[command(name = "equip-hotkeys", version, about = "Inspect equip-hotkeys profiles")]
pub struct CliArgs {
    /// Profile directory (defaults to the plugin's profiles folder)
    #[arg(long, value_name = "DIR", global = true)]
    pub profiles: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List saved profiles
    List,
    /// Print the hotkeys of a saved profile
    Show {
        /// Profile name, without `.json`
        name: String,
    },
    /// Report entries in a profile file that would be dropped on load
    Check {
        file: PathBuf,
    },
    /// Show the normalized form of a profile name
    Name {
        raw: String,
    },
    /// List all key names usable in chords
    Keys,
}

/// Human-readable listing of a profile
pub fn describe(ir: &HotkeysIr) -> String {
    let mut out = String::new();
    for (i, hotkey) in ir.hotkeys.iter().enumerate() {
        let name = if hotkey.name.is_empty() {
            "(unnamed)"
        } else {
            hotkey.name.as_str()
        };
        let _ = writeln!(out, "{}. {}", i + 1, name);
        for keyset in &hotkey.keysets {
            let _ = writeln!(out, "   keys: {}", keyset.join("+"));
        }
        for (j, set) in hotkey.equipsets.iter().enumerate() {
            let gear: Vec<String> = set.iter().map(describe_gear).collect();
            let _ = writeln!(out, "   set {}: {}", j + 1, gear.join(", "));
        }
    }
    out
}

fn slot_name(slot: u8) -> &'static str {
    match slot {
        0 => "left",
        1 => "right",
        2 => "ammo",
        3 => "voice",
        _ => "?",
    }
}

fn describe_gear(gear: &GearIr) -> String {
    if gear.unequip {
        return format!("{}=clear", slot_name(gear.slot));
    }
    if gear.modname.is_empty() {
        format!("{}={:08X}", slot_name(gear.slot), gear.id)
    } else {
        format!("{}={}|{:06X}", slot_name(gear.slot), gear.modname, gear.id)
    }
}

/// Problems the plugin would silently fix when loading this profile
pub fn check(ir: &HotkeysIr) -> Vec<String> {
    let mut issues = Vec::new();
    for (i, hotkey) in ir.hotkeys.iter().enumerate() {
        let at = format!("hotkey {}", i + 1);
        if hotkey.keysets.iter().all(|k| k.is_empty()) && hotkey.equipsets.iter().all(|s| s.is_empty()) {
            issues.push(format!("{}: empty, will be dropped", at));
            continue;
        }
        for name in hotkey.keysets.iter().flatten() {
            if registry::code_of(name) == registry::UNBOUND {
                issues.push(format!("{}: unknown key {:?}", at, name));
            }
        }
        for (j, set) in hotkey.equipsets.iter().enumerate() {
            for gear in set {
                if gear.slot as usize >= equip_hotkeys::gear::Gearslot::COUNT {
                    issues.push(format!("{} set {}: invalid slot {}", at, j + 1, gear.slot));
                } else if !gear.unequip && gear.modname.is_empty() && gear.id == 0 {
                    issues.push(format!("{} set {}: gear without a form", at, j + 1));
                }
            }
        }
        if let Some(sel) = hotkey.active_equipset {
            if sel >= hotkey.equipsets.len() {
                issues.push(format!("{}: active equipset {} out of range", at, sel));
            }
        }
    }
    if let Some(active) = ir.active_hotkey {
        if active >= ir.hotkeys.len() {
            issues.push(format!("active hotkey {} out of range", active));
        }
    }
    issues
}

/// Key names with their codes, one per line
pub fn key_table() -> String {
    let mut out = String::new();
    for (code, name) in registry::all_named() {
        let _ = writeln!(out, "{:>3}  {}", code, name);
    }
    out
}
