//! 简单 CSS 选择器
//!
//! 支持的语法：`tag`、`#id`、`.class`、`[attr]`、`[attr="value"]` 组成的复合选择器，
//! 以及空白分隔的后代组合

use std::fmt;

use crate::dom::{Document, NodeId};
use crate::error::{AppError, AppResult};

/// 属性条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrCondition {
    pub name: String,
    pub value: Option<String>,
}

/// 复合选择器（不含组合符）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrCondition>,
}

impl Compound {
    /// 判断单个元素是否满足
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        if let Some(tag) = &self.tag {
            if !doc.tag(node).eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if doc.attr(node, "id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| doc.has_class(node, c)) {
            return false;
        }
        self.attrs.iter().all(|cond| match (&cond.value, doc.attr(node, &cond.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
        })
    }
}

/// 选择器：从左到右的复合选择器链，相邻项之间是后代关系
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<Compound>,
}

impl Selector {
    /// 解析选择器字符串
    pub fn parse(input: &str) -> AppResult<Self> {
        let parts = input
            .split_whitespace()
            .map(|chunk| parse_compound(input, chunk))
            .collect::<AppResult<Vec<_>>>()?;
        if parts.is_empty() {
            return Err(AppError::selector_parse(input, "选择器为空"));
        }
        Ok(Self { parts })
    }

    /// `tag[name="value"]`，值不经过字符串转义
    pub fn tag_with_attr(tag: &str, name: &str, value: &str) -> Self {
        Self::from(Compound {
            tag: Some(tag.to_string()),
            attrs: vec![AttrCondition {
                name: name.to_string(),
                value: Some(value.to_string()),
            }],
            ..Default::default()
        })
    }

    /// `.class`
    pub fn class(class: &str) -> Self {
        Self::from(Compound {
            classes: vec![class.to_string()],
            ..Default::default()
        })
    }

    /// `tag`
    pub fn tag(tag: &str) -> Self {
        Self::from(Compound {
            tag: Some(tag.to_string()),
            ..Default::default()
        })
    }

    /// 从右向左匹配：最右项匹配自身，其余各项依次匹配最近的祖先
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some((last, rest)) = self.parts.split_last() else {
            return false;
        };
        if !last.matches(doc, node) {
            return false;
        }
        let mut cursor = doc.parent(node);
        for part in rest.iter().rev() {
            loop {
                match cursor {
                    None => return false,
                    Some(ancestor) => {
                        cursor = doc.parent(ancestor);
                        if part.matches(doc, ancestor) {
                            break;
                        }
                    }
                }
            }
        }
        true
    }
}

impl From<Compound> for Selector {
    fn from(compound: Compound) -> Self {
        Self {
            parts: vec![compound],
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if let Some(tag) = &part.tag {
                write!(f, "{}", tag)?;
            }
            if let Some(id) = &part.id {
                write!(f, "#{}", id)?;
            }
            for class in &part.classes {
                write!(f, ".{}", class)?;
            }
            for attr in &part.attrs {
                match &attr.value {
                    Some(value) => write!(f, "[{}=\"{}\"]", attr.name, value)?,
                    None => write!(f, "[{}]", attr.name)?,
                }
            }
        }
        Ok(())
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

fn parse_compound(selector: &str, chunk: &str) -> AppResult<Compound> {
    let chars: Vec<char> = chunk.chars().collect();
    let mut pos = 0;
    let mut compound = Compound::default();

    if chars.first() == Some(&'*') {
        pos += 1;
    } else {
        let tag = take_ident(&chars, &mut pos);
        if !tag.is_empty() {
            compound.tag = Some(tag.to_ascii_lowercase());
        }
    }

    while pos < chars.len() {
        let marker = chars[pos];
        pos += 1;
        match marker {
            '#' | '.' => {
                let ident = take_ident(&chars, &mut pos);
                if ident.is_empty() {
                    return Err(AppError::selector_parse(
                        selector,
                        format!("'{}' 后缺少名称", marker),
                    ));
                }
                if marker == '#' {
                    compound.id = Some(ident);
                } else {
                    compound.classes.push(ident);
                }
            }
            '[' => compound.attrs.push(parse_attr(selector, &chars, &mut pos)?),
            other => {
                return Err(AppError::selector_parse(
                    selector,
                    format!("不支持的字符 '{}'", other),
                ))
            }
        }
    }
    Ok(compound)
}

fn parse_attr(selector: &str, chars: &[char], pos: &mut usize) -> AppResult<AttrCondition> {
    let name = take_ident(chars, pos);
    if name.is_empty() {
        return Err(AppError::selector_parse(selector, "属性名为空"));
    }
    match chars.get(*pos) {
        Some(']') => {
            *pos += 1;
            return Ok(AttrCondition { name, value: None });
        }
        Some('=') => *pos += 1,
        _ => return Err(AppError::selector_parse(selector, "属性条件未闭合")),
    }

    let value = match chars.get(*pos) {
        Some(&quote) if quote == '"' || quote == '\'' => {
            *pos += 1;
            let start = *pos;
            while *pos < chars.len() && chars[*pos] != quote {
                *pos += 1;
            }
            if *pos >= chars.len() {
                return Err(AppError::selector_parse(selector, "引号未闭合"));
            }
            let value: String = chars[start..*pos].iter().collect();
            *pos += 1;
            value
        }
        _ => take_ident(chars, pos),
    };

    if chars.get(*pos) != Some(&']') {
        return Err(AppError::selector_parse(selector, "属性条件未闭合"));
    }
    *pos += 1;
    Ok(AttrCondition {
        name,
        value: Some(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compound_with_attribute() {
        let selector = Selector::parse(r#".option-container[data-question-id="3"]"#).unwrap();
        assert_eq!(
            selector.to_string(),
            r#".option-container[data-question-id="3"]"#
        );
    }

    #[test]
    fn parses_descendant_chain() {
        let selector = Selector::parse("form#quiz-search-form  input[name=search]").unwrap();
        assert_eq!(selector.parts.len(), 2);
        assert_eq!(selector.parts[0].id.as_deref(), Some("quiz-search-form"));
        assert_eq!(selector.parts[1].tag.as_deref(), Some("input"));
    }

    #[test]
    fn rejects_unclosed_attribute() {
        assert!(Selector::parse("input[name=\"x").is_err());
        assert!(Selector::parse("input[name").is_err());
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse("div > p").is_err());
    }

    #[test]
    fn descendant_matching_walks_ancestors() {
        let mut doc = Document::new();
        let form = doc.create_element("form");
        doc.set_attr(form, "id", "f");
        let wrapper = doc.create_element("div");
        let input = doc.create_element("input");
        doc.set_attr(input, "name", "search");
        doc.append_child(doc.root(), form);
        doc.append_child(form, wrapper);
        doc.append_child(wrapper, input);

        assert!(Selector::parse("#f input").unwrap().matches(&doc, input));
        assert!(Selector::parse("form div input[name]").unwrap().matches(&doc, input));
        assert!(!Selector::parse("div form input").unwrap().matches(&doc, input));
    }
}
