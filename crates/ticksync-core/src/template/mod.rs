//! Line-oriented TICK template rewriter.
//!
//! Rewrites a raw alert body so its environment-specific declarations match
//! the current run: the database and Slack-channel declarations are dropped
//! and regenerated at the top of the output, service-URL declarations are
//! replaced in place, and every other line passes through verbatim.
//!
//! Matching is purely substring/prefix based. No TICKscript grammar is
//! parsed, so marker text inside a comment or string literal still counts
//! as a real declaration. That imprecision is part of the contract.

use chrono::{DateTime, Local};

use crate::params::DeployParams;

/// A line containing this anywhere is treated as a database declaration.
pub const DB_MARKER: &str = "var db = ";
/// A line containing this anywhere is treated as a Slack-channel declaration.
pub const SLACK_CHANNEL_MARKER: &str = "var slackChannel = ";
/// A line starting with this is an ASE endpoint declaration.
pub const ASE_URL_MARKER: &str = "var aseUrl =";
/// A line starting with this is an LS endpoint declaration.
pub const LS_URL_MARKER: &str = "var lsUrl = ";
/// A line starting with this is an MDM endpoint declaration.
pub const MDM_URL_MARKER: &str = "var mdmUrl = ";

/// Rewrite a raw alert body with the run's parameters, stamping the current
/// local time into the deployment header.
///
/// Output shape: header comment, blank line, fresh database declaration,
/// blank line, fresh Slack-channel declaration, blank line, then the
/// filtered body. Each generated declaration is followed by a blank line,
/// matching the spacing convention of the declarations it replaces.
pub fn rewrite(raw: &str, params: &DeployParams) -> String {
    rewrite_at(raw, params, Local::now())
}

/// Rewrite with an explicit timestamp. Split out so tests can pin the header.
fn rewrite_at(raw: &str, params: &DeployParams, now: DateTime<Local>) -> String {
    let mut out = String::with_capacity(raw.len() + 128);
    out.push_str(&format!(
        "//Deployed at {}\n\n",
        now.format("%Y-%m-%d %H:%M:%S%.6f")
    ));
    out.push_str(&format!("{DB_MARKER}'{}'\n\n", params.database));
    out.push_str(&format!(
        "{SLACK_CHANNEL_MARKER}'{}'\n\n",
        params.slack_channel
    ));

    // split_inclusive keeps each line's terminator, so pass-through lines
    // are reproduced byte for byte (including a final line with no newline).
    for line in raw.split_inclusive('\n') {
        if line.contains(DB_MARKER) || line.contains(SLACK_CHANNEL_MARKER) {
            continue;
        }
        if line.starts_with(ASE_URL_MARKER) {
            out.push_str(&format!(
                "{ASE_URL_MARKER}'{}'\n\n",
                params.service_urls.ase
            ));
        } else if line.starts_with(LS_URL_MARKER) {
            out.push_str(&format!("{LS_URL_MARKER}'{}'\n\n", params.service_urls.ls));
        } else if line.starts_with(MDM_URL_MARKER) {
            out.push_str(&format!(
                "{MDM_URL_MARKER}'{}'\n\n",
                params.service_urls.mdm
            ));
        } else {
            out.push_str(line);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ServiceUrls;
    use chrono::TimeZone;

    fn test_params() -> DeployParams {
        DeployParams {
            database: "newdb".to_string(),
            slack_channel: "#alerts".to_string(),
            service_urls: ServiceUrls {
                ase: "http://new".to_string(),
                ls: "http://ls.internal".to_string(),
                mdm: "http://mdm.internal".to_string(),
            },
        }
    }

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap()
    }

    const FIXED_HEADER: &str = "//Deployed at 2024-05-17 09:30:00.000000\n\n";

    #[test]
    fn rewrites_db_and_url_declarations() {
        let raw = "var db = 'old'\n\nvar aseUrl ='http://old'\nother line\n";
        let out = rewrite_at(raw, &test_params(), fixed_now());

        let expected = format!(
            "{FIXED_HEADER}var db = 'newdb'\n\nvar slackChannel = '#alerts'\n\n\nvar aseUrl ='http://new'\n\nother line\n"
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_body_yields_only_generated_blocks() {
        let out = rewrite_at("", &test_params(), fixed_now());
        let expected = format!(
            "{FIXED_HEADER}var db = 'newdb'\n\nvar slackChannel = '#alerts'\n\n"
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn db_marker_anywhere_in_line_drops_it() {
        // Even inside a comment: the marker match is substring based.
        let raw = "// note: var db = is set during deploy\nkeep me\n";
        let out = rewrite_at(raw, &test_params(), fixed_now());

        assert!(!out.contains("note"), "comment line should be dropped");
        assert!(out.contains("keep me\n"));
    }

    #[test]
    fn slack_marker_anywhere_in_line_drops_it() {
        let raw = "prefix var slackChannel = '#old' suffix\nkeep me\n";
        let out = rewrite_at(raw, &test_params(), fixed_now());

        assert!(!out.contains("#old"));
        assert!(out.contains("keep me\n"));
    }

    #[test]
    fn url_marker_must_start_the_line() {
        // An indented URL declaration is not replaced, it passes through.
        let raw = "  var aseUrl ='http://old'\n";
        let out = rewrite_at(raw, &test_params(), fixed_now());

        assert!(out.contains("  var aseUrl ='http://old'\n"));
        assert_eq!(out.matches("http://new").count(), 0);
    }

    #[test]
    fn replaces_ls_and_mdm_urls() {
        let raw = "var lsUrl = 'http://old-ls'\nvar mdmUrl = 'http://old-mdm'\n";
        let out = rewrite_at(raw, &test_params(), fixed_now());

        assert!(out.contains("var lsUrl = 'http://ls.internal'\n\n"));
        assert!(out.contains("var mdmUrl = 'http://mdm.internal'\n\n"));
        assert!(!out.contains("old-ls"));
        assert!(!out.contains("old-mdm"));
    }

    #[test]
    fn final_line_without_newline_passes_through() {
        let raw = "stream\n    |from()";
        let out = rewrite_at(raw, &test_params(), fixed_now());

        assert!(out.ends_with("stream\n    |from()"));
    }

    #[test]
    fn rewriting_twice_keeps_one_declaration_per_marker() {
        let raw = "var db = 'old'\nvar slackChannel = '#old'\nvar aseUrl ='http://old'\nvar lsUrl = 'x'\nvar mdmUrl = 'y'\nbody\n";
        let once = rewrite_at(raw, &test_params(), fixed_now());
        let twice = rewrite_at(&once, &test_params(), fixed_now());

        assert_eq!(twice.matches(DB_MARKER).count(), 1);
        assert_eq!(twice.matches(SLACK_CHANNEL_MARKER).count(), 1);
        assert_eq!(twice.matches(ASE_URL_MARKER).count(), 1);
        assert_eq!(twice.matches(LS_URL_MARKER).count(), 1);
        assert_eq!(twice.matches(MDM_URL_MARKER).count(), 1);
        assert_eq!(twice.matches("body\n").count(), 1);
    }

    #[test]
    fn rewrite_stamps_a_header() {
        let out = rewrite("stream\n", &test_params());
        assert!(
            out.starts_with("//Deployed at "),
            "expected deployment header, got: {out:?}"
        );
    }
}
