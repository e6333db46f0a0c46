//! Destructuring flattening.
//!
//! Turns a pattern and a value into a list of plain assignments, one per
//! bound name, so each exported name can be published on its own:
//!
//! ```javascript
//! // export var { a, b: [c = 1] } = obj;
//! exports_1("a", a = obj.a), _a = obj.b[0], exports_1("c", c = _a === void 0 ? 1 : _a)
//! ```
//!
//! Values read more than once are stored in temporaries declared in the
//! current lexical environment.

use modlower_ast::walk::collect_binding_names;
use modlower_ast::{
    ArrayPattern, BinaryOp, Expr, ObjectPattern, ObjectPatternProp, Pattern, PropName, UnaryOp,
};
use modlower_binder::Resolver;
use modlower_common::limits::MAX_BINDING_PATTERN_DEPTH;

use crate::error::TransformError;
use crate::transforms::helpers::{REST_HELPER_NAME, is_identifier_name};
use crate::transforms::module_system::FileTransform;

/// Names the flattened pattern binds; a value held in one of them cannot be
/// reused in place of a temporary.
type BoundNames = Vec<String>;

impl<R: Resolver + ?Sized> FileTransform<'_, R> {
    /// Append the assignments binding `pattern` to `value` to `out`.
    pub(crate) fn flatten_destructuring(
        &mut self,
        pattern: &Pattern,
        value: Expr,
        out: &mut Vec<Expr>,
    ) -> Result<(), TransformError> {
        let bound = bound_names(pattern);
        self.flatten_target(pattern, value, out, &bound, 0)
    }

    /// Flatten a destructuring assignment expression. When its value is
    /// used, the assigned value is appended so the sequence still
    /// evaluates to it.
    pub(crate) fn flatten_assignment(
        &mut self,
        pattern: &Pattern,
        value: Expr,
        value_used: bool,
    ) -> Result<Expr, TransformError> {
        let bound = bound_names(pattern);
        let mut exprs = Vec::new();
        let value = if value_used {
            self.ensure_identifier(value, &mut exprs, &bound)
        } else {
            value
        };
        self.flatten_target(pattern, value.clone(), &mut exprs, &bound, 0)?;
        if value_used {
            exprs.push(value.clone());
        }
        Ok(Expr::seq(exprs).unwrap_or(value))
    }

    /// `value` itself when it is an identifier the pattern cannot rebind,
    /// otherwise a fresh temporary assigned to it.
    fn ensure_identifier(&mut self, value: Expr, out: &mut Vec<Expr>, bound: &[String]) -> Expr {
        if let Expr::Ident(ident) = &value
            && (ident.id.is_synthetic() || !bound.contains(&ident.name))
        {
            return value;
        }
        let temp = self.ctx.create_temp_variable();
        out.push(Expr::assign_name(temp.as_str(), value));
        Expr::id(temp)
    }

    fn flatten_target(
        &mut self,
        target: &Pattern,
        value: Expr,
        out: &mut Vec<Expr>,
        bound: &[String],
        depth: u32,
    ) -> Result<(), TransformError> {
        if depth > MAX_BINDING_PATTERN_DEPTH {
            return Err(TransformError::MaxDepthExceeded {
                file: self.state.file_name.clone(),
            });
        }
        match target {
            Pattern::Ident(ident) => out.push(self.create_binding_assignment(ident, value)),
            Pattern::Expr(member) => {
                let member = self.visit_expression(member, true)?;
                out.push(Expr::assign(Pattern::Expr(Box::new(member)), value));
            }
            Pattern::Object(object) => self.flatten_object(object, value, out, bound, depth + 1)?,
            Pattern::Array(array) => self.flatten_array(array, value, out, bound, depth + 1)?,
        }
        Ok(())
    }

    /// Flatten one element that may carry a default value.
    fn flatten_element(
        &mut self,
        target: &Pattern,
        default: Option<&Expr>,
        value: Expr,
        out: &mut Vec<Expr>,
        bound: &[String],
        depth: u32,
    ) -> Result<(), TransformError> {
        let value = match default {
            Some(default) => {
                let temp = self.ensure_identifier(value, out, bound);
                let default = self.visit_expression(default, true)?;
                Expr::conditional(
                    Expr::binary(temp.clone(), BinaryOp::EqEqEq, Expr::void_0()),
                    default,
                    temp,
                )
            }
            None => value,
        };
        self.flatten_target(target, value, out, bound, depth)
    }

    fn flatten_object(
        &mut self,
        object: &ObjectPattern,
        value: Expr,
        out: &mut Vec<Expr>,
        bound: &[String],
        depth: u32,
    ) -> Result<(), TransformError> {
        let element_count = object.props.len() + usize::from(object.rest.is_some());
        let value = if element_count == 1 {
            value
        } else {
            self.ensure_identifier(value, out, bound)
        };
        let has_rest = object.rest.is_some();
        let mut excluded_keys = Vec::new();

        for prop in &object.props {
            match prop {
                ObjectPatternProp::KeyValue {
                    key,
                    value: target,
                    default,
                } => {
                    let (access, excluded) =
                        self.property_access(value.clone(), key, has_rest, out, bound)?;
                    excluded_keys.push(excluded);
                    self.flatten_element(target, default.as_ref(), access, out, bound, depth)?;
                }
                ObjectPatternProp::Shorthand { name, default } => {
                    let access = Expr::prop(value.clone(), name.name.as_str());
                    excluded_keys.push(Expr::string(name.name.as_str()));
                    let target = Pattern::Ident(name.clone());
                    self.flatten_element(&target, default.as_ref(), access, out, bound, depth)?;
                }
            }
        }

        if let Some(rest) = &object.rest {
            self.needs_rest_helper = true;
            let remaining = Expr::call(
                Expr::id(REST_HELPER_NAME),
                vec![value, Expr::array(excluded_keys)],
            );
            self.flatten_target(rest, remaining, out, bound, depth)?;
        }
        Ok(())
    }

    /// Read of property `key` off `value`, plus the key as it is listed in
    /// an object rest's exclusion list.
    fn property_access(
        &mut self,
        value: Expr,
        key: &PropName,
        has_rest: bool,
        out: &mut Vec<Expr>,
        bound: &[String],
    ) -> Result<(Expr, Expr), TransformError> {
        Ok(match key {
            PropName::Ident(name) => (Expr::prop(value, name.as_str()), Expr::string(name.as_str())),
            PropName::Str(name) if is_identifier_name(name) => {
                (Expr::prop(value, name.as_str()), Expr::string(name.as_str()))
            }
            PropName::Str(name) => (
                Expr::elem(value, Expr::string(name.as_str())),
                Expr::string(name.as_str()),
            ),
            PropName::Num(number) => (
                Expr::elem(value, Expr::number(number.as_str())),
                Expr::string(number.as_str()),
            ),
            PropName::Computed(expr) => {
                let key = self.visit_expression(expr, true)?;
                if has_rest {
                    // Evaluated once: used for the read and the exclusion.
                    let key = self.ensure_identifier(key, out, bound);
                    (Expr::elem(value, key.clone()), property_key(key))
                } else {
                    (Expr::elem(value, key.clone()), key)
                }
            }
        })
    }

    fn flatten_array(
        &mut self,
        array: &ArrayPattern,
        value: Expr,
        out: &mut Vec<Expr>,
        bound: &[String],
        depth: u32,
    ) -> Result<(), TransformError> {
        let element_count = array.elements.len() + usize::from(array.rest.is_some());
        let value = if element_count == 1 {
            value
        } else {
            self.ensure_identifier(value, out, bound)
        };

        for (index, element) in array.elements.iter().enumerate() {
            let Some(element) = element else {
                continue;
            };
            let access = Expr::elem(value.clone(), Expr::number(index.to_string()));
            self.flatten_element(
                &element.target,
                element.default.as_ref(),
                access,
                out,
                bound,
                depth,
            )?;
        }

        if let Some(rest) = &array.rest {
            let remaining = Expr::call(
                Expr::prop(value, "slice"),
                vec![Expr::number(array.elements.len().to_string())],
            );
            self.flatten_target(rest, remaining, out, bound, depth)?;
        }
        Ok(())
    }
}

fn bound_names(pattern: &Pattern) -> BoundNames {
    collect_binding_names(pattern)
        .into_iter()
        .map(|ident| ident.name.clone())
        .collect()
}

/// `typeof k === "symbol" ? k : k + ""`
fn property_key(key: Expr) -> Expr {
    Expr::conditional(
        Expr::binary(
            Expr::Unary {
                op: UnaryOp::TypeOf,
                arg: Box::new(key.clone()),
            },
            BinaryOp::EqEqEq,
            Expr::string("symbol"),
        ),
        key.clone(),
        Expr::binary(key, BinaryOp::Add, Expr::string("")),
    )
}

#[cfg(test)]
#[path = "../../tests/destructuring.rs"]
mod tests;
