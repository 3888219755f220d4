//! 原生约束校验
//!
//! 只校验标记上声明的约束：required / minlength / maxlength / pattern /
//! type=email / type=number 的 min、max

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::dom::{Document, NodeId};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+$").expect("email regex is valid")
});

/// 约束违例
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    ValueMissing,
    TooShort,
    TooLong,
    PatternMismatch,
    TypeMismatch,
    BadInput,
    RangeUnderflow,
    RangeOverflow,
}

impl Document {
    /// 表单内全部不满足约束的控件及第一条违例
    pub fn invalid_controls(&self, form: NodeId) -> Vec<(NodeId, ConstraintViolation)> {
        self.form_controls(form)
            .into_iter()
            .filter_map(|control| self.control_violation(control).map(|v| (control, v)))
            .collect()
    }

    /// 等价于浏览器的 `form.checkValidity()`
    pub fn check_validity(&self, form: NodeId) -> bool {
        let invalid = self.invalid_controls(form);
        for (control, violation) in &invalid {
            debug!("控件 {} 校验失败: {:?}", self.describe(*control), violation);
        }
        invalid.is_empty()
    }

    fn control_violation(&self, control: NodeId) -> Option<ConstraintViolation> {
        let kind = self.attr(control, "type").unwrap_or("text");
        if kind == "hidden" {
            return None;
        }
        let value = self.value(control);

        if self.has_attr(control, "required") {
            let missing = match kind {
                "checkbox" | "radio" => !self.checked(control),
                _ => value.is_empty(),
            };
            if missing {
                return Some(ConstraintViolation::ValueMissing);
            }
        }
        if value.is_empty() {
            return None;
        }

        let len = value.chars().count();
        if let Some(min) = self.numeric_attr::<usize>(control, "minlength") {
            if len < min {
                return Some(ConstraintViolation::TooShort);
            }
        }
        if let Some(max) = self.numeric_attr::<usize>(control, "maxlength") {
            if len > max {
                return Some(ConstraintViolation::TooLong);
            }
        }

        if let Some(pattern) = self.attr(control, "pattern") {
            // 非法正则按浏览器行为忽略
            if let Ok(re) = Regex::new(&format!("^(?:{})$", pattern)) {
                if !re.is_match(value) {
                    return Some(ConstraintViolation::PatternMismatch);
                }
            }
        }

        match kind {
            "email" if !EMAIL_RE.is_match(value) => Some(ConstraintViolation::TypeMismatch),
            "number" => {
                let Ok(number) = value.trim().parse::<f64>() else {
                    return Some(ConstraintViolation::BadInput);
                };
                if self
                    .numeric_attr::<f64>(control, "min")
                    .is_some_and(|min| number < min)
                {
                    return Some(ConstraintViolation::RangeUnderflow);
                }
                if self
                    .numeric_attr::<f64>(control, "max")
                    .is_some_and(|max| number > max)
                {
                    return Some(ConstraintViolation::RangeOverflow);
                }
                None
            }
            _ => None,
        }
    }

    fn numeric_attr<T: std::str::FromStr>(&self, node: NodeId, name: &str) -> Option<T> {
        self.attr(node, name).and_then(|v| v.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(attrs: &[(&str, &str)], value: &str) -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let form = doc.create_element("form");
        let input = doc.create_element("input");
        doc.set_attr(input, "name", "field");
        for (name, v) in attrs {
            doc.set_attr(input, name, v);
        }
        doc.set_value(input, value);
        doc.append_child(doc.root(), form);
        doc.append_child(form, input);
        (doc, form, input)
    }

    fn violation(attrs: &[(&str, &str)], value: &str) -> Option<ConstraintViolation> {
        let (doc, form, _) = form_with(attrs, value);
        doc.invalid_controls(form).first().map(|(_, v)| *v)
    }

    #[test]
    fn required_field_must_not_be_empty() {
        assert_eq!(
            violation(&[("required", "")], ""),
            Some(ConstraintViolation::ValueMissing)
        );
        assert_eq!(violation(&[("required", "")], "x"), None);
    }

    #[test]
    fn optional_empty_field_skips_other_constraints() {
        assert_eq!(violation(&[("minlength", "3"), ("pattern", "[0-9]+")], ""), None);
    }

    #[test]
    fn length_and_pattern_constraints() {
        assert_eq!(
            violation(&[("minlength", "3")], "ab"),
            Some(ConstraintViolation::TooShort)
        );
        assert_eq!(
            violation(&[("maxlength", "2")], "abc"),
            Some(ConstraintViolation::TooLong)
        );
        assert_eq!(
            violation(&[("pattern", "[0-9]+")], "12a"),
            Some(ConstraintViolation::PatternMismatch)
        );
        assert_eq!(violation(&[("pattern", "[0-9]+")], "123"), None);
        assert_eq!(violation(&[("pattern", "([")], "anything"), None);
    }

    #[test]
    fn typed_inputs() {
        assert_eq!(
            violation(&[("type", "email")], "not-an-email"),
            Some(ConstraintViolation::TypeMismatch)
        );
        assert_eq!(violation(&[("type", "email")], "a@b.c"), None);
        assert_eq!(
            violation(&[("type", "number"), ("min", "1")], "0"),
            Some(ConstraintViolation::RangeUnderflow)
        );
        assert_eq!(
            violation(&[("type", "number"), ("max", "10")], "11"),
            Some(ConstraintViolation::RangeOverflow)
        );
        assert_eq!(
            violation(&[("type", "number")], "ten"),
            Some(ConstraintViolation::BadInput)
        );
    }

    #[test]
    fn disabled_controls_are_not_validated() {
        let (mut doc, form, input) = form_with(&[("required", "")], "");
        assert!(!doc.check_validity(form));
        doc.set_attr(input, "disabled", "");
        assert!(doc.check_validity(form));
    }

    #[test]
    fn required_checkbox_needs_checked() {
        let (mut doc, form, input) = form_with(&[("type", "checkbox"), ("required", "")], "on");
        assert!(!doc.check_validity(form));
        doc.set_checked(input, true);
        assert!(doc.check_validity(form));
    }
}
