//! Profile changes requested on the command line.

use anyhow::{bail, Context, Result};
use gigs_core::loose::format_number;
use gigs_core::{FieldKey, Profile, ProfileEditor, ProfileSchema};

/// A single change to apply to the edit buffer
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Text or numeric field, resolved against the schema
    Set { field: String, value: String },
    AddTag { field: String, value: String },
    RemoveTag { field: String, value: String },
    Toggle(String),
    RemoveGallery(usize),
}

/// Parse `FIELD=VALUE`. The value may be empty and may contain `=`.
pub fn parse_assignment(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got {s:?}")),
    }
}

/// Apply one change to the editor, which must be in edit mode.
pub fn apply<S: ProfileSchema>(editor: &mut ProfileEditor<S>, edit: &Edit) -> Result<()> {
    match edit {
        Edit::Set { field, value } => {
            if let Ok(text) = field.parse::<S::Text>() {
                editor.set_text(text, value.as_str())?;
            } else {
                let number = field.parse::<S::Number>()?;
                let value = value
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .with_context(|| format!("{field} expects a number, got {value:?}"))?;
                editor.set_number(number, value)?;
            }
        }
        Edit::AddTag { field, value } => {
            if !editor.add_tag(field.parse()?, value)? {
                println!("{field}: {value:?} already present or blank, skipped");
            }
        }
        Edit::RemoveTag { field, value } => {
            if !editor.remove_tag(field.parse()?, value)? {
                bail!("{field} has no entry {value:?}");
            }
        }
        Edit::Toggle(field) => {
            editor.toggle_flag(field.parse()?)?;
        }
        Edit::RemoveGallery(index) => {
            editor.remove_gallery_entry(*index)?;
        }
    }
    Ok(())
}

/// Render every editable field, then media.
pub fn render<S: ProfileSchema>(profile: &Profile<S>) -> String {
    let mut lines = Vec::new();
    for &field in S::Text::ALL {
        lines.push(line(field.name(), S::text(&profile.fields, field)));
    }
    for &field in S::Number::ALL {
        lines.push(line(
            field.name(),
            &format_number(S::number(&profile.fields, field)),
        ));
    }
    for &field in S::Tags::ALL {
        lines.push(line(field.name(), &S::tags(&profile.fields, field).join(", ")));
    }
    for &field in S::Flag::ALL {
        let value = if S::flag(&profile.fields, field) { "yes" } else { "no" };
        lines.push(line(field.name(), value));
    }
    lines.push(line("profile_picture", profile.avatar_url()));
    for (index, url) in profile.gallery_urls().into_iter().enumerate() {
        lines.push(line(&format!("gallery[{index}]"), url));
    }
    lines.join("\n")
}

fn line(name: &str, value: &str) -> String {
    format!("{name:<32} {value}")
}
