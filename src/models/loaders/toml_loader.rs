use crate::error::{AppError, AppResult};
use crate::models::fixture::PageFixture;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载页面夹具
pub async fn load_page_fixture(path: &Path) -> AppResult<PageFixture> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&display, e))?;

    let mut fixture = parse_page_fixture(&content).map_err(|e| match e {
        AppError::File(crate::error::FileError::TomlParseFailed { source, .. }) => {
            AppError::toml_parse_failed(&display, source)
        }
        other => other,
    })?;

    // 设置文件路径
    fixture.file_path = Some(display);

    Ok(fixture)
}

/// 从 TOML 文本解析页面夹具
pub fn parse_page_fixture(content: &str) -> AppResult<PageFixture> {
    let fixture: PageFixture = toml::from_str(content)?;
    tracing::debug!(
        "解析夹具: {} 个顶层元素, {} 个操作",
        fixture.elements.len(),
        fixture.actions.len()
    );
    Ok(fixture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixture::Action;

    const FIXTURE: &str = r#"
title = "代数测验"

[[elements]]
tag = "form"
id = "quiz-form"

[[elements.children]]
class = ["option-container"]
attrs = { "data-question-id" = "1", "data-option-id" = "11" }
text = "x = 2"

[[elements.children]]
tag = "input"
attrs = { type = "hidden", name = "question_1" }

[[actions]]
kind = "click"
target = ".option-container"

[[actions]]
kind = "wait"
ms = 1500
"#;

    #[test]
    fn parses_nested_elements_and_actions() {
        let fixture = parse_page_fixture(FIXTURE).unwrap();
        assert_eq!(fixture.title.as_deref(), Some("代数测验"));
        assert_eq!(fixture.elements[0].children.len(), 2);
        assert_eq!(fixture.elements[0].children[0].tag, "div");
        assert_eq!(
            fixture.actions,
            vec![
                Action::Click {
                    target: ".option-container".to_string()
                },
                Action::Wait { ms: 1500 },
            ]
        );

        let doc = fixture.build_document();
        let option = doc.select_one(".option-container").unwrap();
        assert_eq!(doc.attr(option, "data-option-id"), Some("11"));
        assert_eq!(doc.text_content(option), "x = 2");
        assert_eq!(doc.select_all("form#quiz-form input").unwrap().len(), 1);
    }

    #[test]
    fn unknown_action_kind_is_an_error() {
        let err = parse_page_fixture("[[actions]]\nkind = \"hover\"\ntarget = \"a\"\n").unwrap_err();
        assert!(matches!(err, AppError::File(_)));
    }

    #[tokio::test]
    async fn loaded_fixture_remembers_its_path() {
        let path = std::env::temp_dir().join(format!("quiz-page-fixture-{}.toml", std::process::id()));
        tokio::fs::write(&path, FIXTURE).await.unwrap();

        let fixture = load_page_fixture(&path).await.unwrap();
        assert_eq!(fixture.file_path, Some(path.display().to_string()));
        assert_eq!(fixture.actions.len(), 2);
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn missing_file_reports_path() {
        let err = load_page_fixture(Path::new("does/not/exist.toml"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
