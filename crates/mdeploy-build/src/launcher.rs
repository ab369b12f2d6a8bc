//! Launcher manifest written into the bundle root.
//!
//! The hosting environment runs `npm start` against this `package.json`;
//! the start script loads `settings.json` into `METEOR_SETTINGS` before
//! starting the server entry point. The script text is an external
//! contract and is reproduced verbatim.

/// Render the launcher `package.json` for the given application version.
pub fn render(version: &str) -> String {
    format!(
        r#"{{
  "name": "app",
  "version": "{version}",
  "scripts": {{
    "start": "METEOR_SETTINGS=\"$(cat settings.json)\" node main.js"
  }}
}}
"#
    )
}
