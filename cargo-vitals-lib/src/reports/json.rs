use crate::Result;
use crate::info::{Output, ProjectInfo};
use core::fmt::Write;
use serde_json::json;

pub fn generate<W: Write>(output: &Output, project: &ProjectInfo, writer: &mut W) -> Result<()> {
    let document = json!({
        "project": {
            "package": project.package,
            "target": project.target,
            "profile": project.profile,
            "version": project.version,
            "build_number": project.build_number,
            "description": project.description,
        },
        "raw": output.raw(),
        "summaries": output.summaries(),
        "errors": output.errors(),
    });

    write!(writer, "{}", serde_json::to_string_pretty(&document)?)?;
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::info::OutputBuilder;
    use crate::reports::tests::{output, project};

    #[test]
    fn test_generate() {
        let mut text = String::new();
        generate(&output(), &project(), &mut text).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["project"]["build_number"], "88");
        assert_eq!(parsed["raw"]["warning_count"], 15);
        assert_eq!(parsed["raw"]["lines_of_code"], 900);
        assert!(parsed["raw"].get("lint_count").is_none());
        assert_eq!(parsed["summaries"][0]["provider"], "warning_count");
        assert_eq!(parsed["summaries"][0]["style"], "negative");
        assert_eq!(parsed["summaries"][0]["number"], 15.0);
        assert!(parsed["summaries"][1].get("number").is_none());
        assert_eq!(parsed["summaries"][2]["text"], "10 source files (decreased by 1 from 11)");
        assert_eq!(parsed["errors"], json!(["lint_count: tool not found"]));
    }

    #[test]
    fn test_generate_round_trips_output() {
        let original = output();
        let mut text = String::new();
        generate(&original, &project(), &mut text).unwrap();

        let mut parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        let _ = parsed.as_object_mut().unwrap().remove("project");
        let restored: Output = serde_json::from_value(parsed).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_generate_empty_output() {
        let mut text = String::new();
        generate(&OutputBuilder::new().build(), &project(), &mut text).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["summaries"], json!([]));
        assert_eq!(parsed["errors"], json!([]));
        assert!(text.contains('\n'));
    }
}
