//! Expression substitution for the System module transform.
//!
//! Reads of imported names become property reads on the module alias.
//! Writes to exported names are wrapped in exporter calls that pass the
//! written value through, so every expression keeps its original value:
//!
//! | input         | output                    |
//! |---------------|---------------------------|
//! | `x = e`       | `exports_1("x", x = e)`   |
//! | `++x`         | `exports_1("x", ++x)`     |
//! | `x++`         | `exports_1("x", ++x) - 1` |
//! | `x--`         | `exports_1("x", --x) + 1` |
//! | `x++;`        | `exports_1("x", ++x);`    |
//! | `imported`    | `dep_1.imported`          |
//! | `import.meta` | `context_1.meta`          |

use modlower_ast::walk::collect_binding_names;
use modlower_ast::{
    ArrayPattern, ArrayPatternElement, AssignOp, BinaryOp, Expr, Ident, MemberProp,
    ObjectPattern, ObjectPatternProp, Pattern, Prop, PropName, Template, UpdateOp,
};
use modlower_binder::{ImportBindingKind, Resolver};
use modlower_common::limits::{STACK_RED_ZONE, STACK_SEGMENT_SIZE};
use smallvec::SmallVec;

use super::FileTransform;
use crate::error::TransformError;
use crate::transforms::helpers::is_identifier_name;

impl<R: Resolver + ?Sized> FileTransform<'_, R> {
    /// Rewrite `expr`. `value_used` is false when the result is discarded
    /// (expression statements, `for` updates).
    pub(crate) fn visit_expression(
        &mut self,
        expr: &Expr,
        value_used: bool,
    ) -> Result<Expr, TransformError> {
        self.enter_node()?;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || {
            self.visit_expression_inner(expr, value_used)
        });
        self.exit_node();
        result
    }

    fn visit_expressions(&mut self, exprs: &[Expr]) -> Result<Vec<Expr>, TransformError> {
        exprs
            .iter()
            .map(|expr| self.visit_expression(expr, true))
            .collect()
    }

    fn visit_boxed(&mut self, expr: &Expr) -> Result<Box<Expr>, TransformError> {
        Ok(Box::new(self.visit_expression(expr, true)?))
    }

    fn visit_expression_inner(
        &mut self,
        expr: &Expr,
        value_used: bool,
    ) -> Result<Expr, TransformError> {
        Ok(match expr {
            Expr::Ident(ident) => self.substitute_identifier(ident),
            Expr::Lit(_) | Expr::This | Expr::Super => expr.clone(),
            Expr::Template(template) => Expr::Template(self.visit_template(template)?),
            Expr::TaggedTemplate { tag, template } => Expr::TaggedTemplate {
                tag: self.visit_boxed(tag)?,
                template: self.visit_template(template)?,
            },
            Expr::Array(elements) => {
                let mut rewritten = Vec::with_capacity(elements.len());
                for element in elements {
                    rewritten.push(match element {
                        Some(element) => Some(self.visit_expression(element, true)?),
                        None => None,
                    });
                }
                Expr::Array(rewritten)
            }
            Expr::Object(props) => {
                let mut rewritten = Vec::with_capacity(props.len());
                for prop in props {
                    rewritten.push(self.visit_prop(prop)?);
                }
                Expr::Object(rewritten)
            }
            Expr::Function(function) => Expr::Function(Box::new(self.visit_function(function)?)),
            Expr::Arrow(arrow) => Expr::Arrow(Box::new(self.visit_arrow(arrow)?)),
            Expr::Class(class) => Expr::Class(Box::new(self.visit_class(class)?)),
            Expr::Unary { op, arg } => Expr::Unary {
                op: *op,
                arg: self.visit_boxed(arg)?,
            },
            Expr::Update { op, prefix, arg } => self.visit_update(*op, *prefix, arg, value_used)?,
            Expr::Binary { op, left, right } => Expr::Binary {
                op: *op,
                left: self.visit_boxed(left)?,
                right: self.visit_boxed(right)?,
            },
            Expr::Assign { op, target, value } => {
                self.visit_assignment(*op, target, value, value_used)?
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => Expr::Conditional {
                test: self.visit_boxed(test)?,
                consequent: Box::new(self.visit_expression(consequent, value_used)?),
                alternate: Box::new(self.visit_expression(alternate, value_used)?),
            },
            Expr::Call {
                callee,
                args,
                optional,
            } => Expr::Call {
                callee: self.visit_boxed(callee)?,
                args: self.visit_expressions(args)?,
                optional: *optional,
            },
            Expr::New { callee, args } => Expr::New {
                callee: self.visit_boxed(callee)?,
                args: match args {
                    Some(args) => Some(self.visit_expressions(args)?),
                    None => None,
                },
            },
            Expr::Member {
                object,
                property,
                optional,
            } => Expr::Member {
                object: self.visit_boxed(object)?,
                property: match property {
                    MemberProp::Ident(name) => MemberProp::Ident(name.clone()),
                    MemberProp::Computed(index) => MemberProp::Computed(self.visit_boxed(index)?),
                },
                optional: *optional,
            },
            Expr::Seq(exprs) => {
                let last = exprs.len().saturating_sub(1);
                let mut rewritten = Vec::with_capacity(exprs.len());
                for (index, expr) in exprs.iter().enumerate() {
                    rewritten.push(self.visit_expression(expr, value_used && index == last)?);
                }
                Expr::Seq(rewritten)
            }
            Expr::Paren(inner) => Expr::Paren(Box::new(self.visit_expression(inner, value_used)?)),
            Expr::Yield { arg, delegate } => Expr::Yield {
                arg: match arg {
                    Some(arg) => Some(self.visit_boxed(arg)?),
                    None => None,
                },
                delegate: *delegate,
            },
            Expr::Await(arg) => Expr::Await(self.visit_boxed(arg)?),
            Expr::Spread(arg) => Expr::Spread(self.visit_boxed(arg)?),
            Expr::ImportCall(specifier) => Expr::call(
                Expr::prop(Expr::id(self.state.context.as_str()), "import"),
                vec![self.visit_expression(specifier, true)?],
            ),
            Expr::ImportMeta => Expr::prop(Expr::id(self.state.context.as_str()), "meta"),
        })
    }

    fn visit_template(&mut self, template: &Template) -> Result<Template, TransformError> {
        Ok(Template {
            quasis: template.quasis.clone(),
            exprs: self.visit_expressions(&template.exprs)?,
        })
    }

    fn visit_prop(&mut self, prop: &Prop) -> Result<Prop, TransformError> {
        Ok(match prop {
            Prop::KeyValue { key, value } => Prop::KeyValue {
                key: self.visit_prop_name(key)?,
                value: self.visit_expression(value, true)?,
            },
            Prop::Shorthand(ident) => match self.substitute_identifier(ident) {
                Expr::Ident(substituted) if substituted.name == ident.name => {
                    Prop::Shorthand(ident.clone())
                }
                value => Prop::KeyValue {
                    key: PropName::Ident(ident.name.clone()),
                    value,
                },
            },
            Prop::Method {
                key,
                kind,
                function,
            } => Prop::Method {
                key: self.visit_prop_name(key)?,
                kind: *kind,
                function: self.visit_function(function)?,
            },
            Prop::Spread(expr) => Prop::Spread(self.visit_expression(expr, true)?),
        })
    }

    // =========================================================================
    // Imports
    // =========================================================================

    /// The expression an identifier reads after lowering.
    fn substitute_identifier(&self, ident: &Ident) -> Expr {
        let Some(binding) = self.resolver.referenced_import_declaration(ident) else {
            return Expr::Ident(ident.clone());
        };
        let Some(alias) = self.aliases.get(&binding.declaration) else {
            return Expr::Ident(ident.clone());
        };
        match binding.kind {
            ImportBindingKind::Default => self.import_property(alias, "default"),
            ImportBindingKind::Named { imported } => self.import_property(alias, &imported),
            ImportBindingKind::Namespace | ImportBindingKind::ImportEquals => {
                if *alias == ident.name {
                    Expr::Ident(ident.clone())
                } else {
                    Expr::id(alias.as_str())
                }
            }
        }
    }

    /// `alias.name`, or `alias["name"]` when `name` cannot be written after a
    /// dot in the output language level.
    fn import_property(&self, alias: &str, name: &str) -> Expr {
        if self.options.target.is_es3() || !is_identifier_name(name) {
            Expr::elem(Expr::id(alias), Expr::string(name))
        } else {
            Expr::prop(Expr::id(alias), name)
        }
    }

    // =========================================================================
    // Exports
    // =========================================================================

    /// Names a write to `ident` must be published under; empty when the
    /// binding is not exported by this file.
    pub(crate) fn exported_names_for(&self, ident: &Ident) -> SmallVec<[String; 1]> {
        if ident.id.is_synthetic()
            || self.resolver.referenced_export_container(ident) != Some(self.file.id)
            || self.resolver.referenced_import_declaration(ident).is_some()
        {
            return SmallVec::new();
        }
        let names = self
            .resolver
            .referenced_value_declaration(ident)
            .map(|declaration| self.info.exported_names_of(declaration))
            .unwrap_or_default();
        if names.is_empty() {
            SmallVec::from_elem(ident.name.clone(), 1)
        } else {
            names.iter().cloned().collect()
        }
    }

    /// Wrap `expr` in one exporter call per exported name of `ident`.
    fn wrap_exported(&self, ident: &Ident, expr: Expr) -> Expr {
        self.exported_names_for(ident)
            .iter()
            .fold(expr, |value, name| self.export_call(name, value))
    }

    /// `name = value`, published when `name` is exported.
    pub(crate) fn create_binding_assignment(&self, ident: &Ident, value: Expr) -> Expr {
        let assignment = Expr::assign(Pattern::Ident(ident.clone()), value);
        self.wrap_exported(ident, assignment)
    }

    fn visit_update(
        &mut self,
        op: UpdateOp,
        prefix: bool,
        arg: &Expr,
        value_used: bool,
    ) -> Result<Expr, TransformError> {
        if let Expr::Ident(ident) = arg.skip_parens() {
            let names = self.exported_names_for(ident);
            if !names.is_empty() {
                let updated = Expr::Update {
                    op,
                    prefix: true,
                    arg: Box::new(Expr::Ident(ident.clone())),
                };
                let exported = names
                    .iter()
                    .fold(updated, |value, name| self.export_call(name, value));
                if prefix || !value_used {
                    return Ok(exported);
                }
                // The prefix form yields the updated value; step back to the
                // value the postfix form would have produced.
                let (restore, one) = match op {
                    UpdateOp::Increment => (BinaryOp::Sub, Expr::number("1")),
                    UpdateOp::Decrement => (BinaryOp::Add, Expr::number("1")),
                };
                return Ok(Expr::binary(exported, restore, one));
            }
        }
        Ok(Expr::Update {
            op,
            prefix,
            arg: self.visit_boxed(arg)?,
        })
    }

    fn visit_assignment(
        &mut self,
        op: AssignOp,
        target: &Pattern,
        value: &Expr,
        value_used: bool,
    ) -> Result<Expr, TransformError> {
        match target {
            Pattern::Ident(ident) => {
                let value = self.visit_expression(value, true)?;
                let assignment = Expr::assign_op(Pattern::Ident(ident.clone()), op, value);
                Ok(self.wrap_exported(ident, assignment))
            }
            Pattern::Expr(member) => Ok(Expr::assign_op(
                Pattern::Expr(self.visit_boxed(member)?),
                op,
                self.visit_expression(value, true)?,
            )),
            pattern if op == AssignOp::Assign && self.has_exported_leaf(pattern) => {
                let value = self.visit_expression(value, true)?;
                self.flatten_assignment(pattern, value, value_used)
            }
            pattern => Ok(Expr::assign_op(
                self.visit_pattern(pattern)?,
                op,
                self.visit_expression(value, true)?,
            )),
        }
    }

    fn has_exported_leaf(&self, pattern: &Pattern) -> bool {
        collect_binding_names(pattern)
            .into_iter()
            .any(|ident| !self.exported_names_for(ident).is_empty())
    }

    // =========================================================================
    // Patterns
    // =========================================================================

    /// Substitute the expressions inside a pattern that stays a pattern
    /// (defaults, computed keys and member targets).
    pub(crate) fn visit_pattern(&mut self, pattern: &Pattern) -> Result<Pattern, TransformError> {
        Ok(match pattern {
            Pattern::Ident(_) => pattern.clone(),
            Pattern::Expr(expr) => Pattern::Expr(self.visit_boxed(expr)?),
            Pattern::Object(object) => {
                let mut props = Vec::with_capacity(object.props.len());
                for prop in &object.props {
                    props.push(match prop {
                        ObjectPatternProp::KeyValue {
                            key,
                            value,
                            default,
                        } => ObjectPatternProp::KeyValue {
                            key: self.visit_prop_name(key)?,
                            value: self.visit_pattern(value)?,
                            default: self.visit_default(default.as_ref())?,
                        },
                        ObjectPatternProp::Shorthand { name, default } => {
                            ObjectPatternProp::Shorthand {
                                name: name.clone(),
                                default: self.visit_default(default.as_ref())?,
                            }
                        }
                    });
                }
                Pattern::Object(ObjectPattern {
                    props,
                    rest: self.visit_rest(object.rest.as_deref())?,
                })
            }
            Pattern::Array(array) => {
                let mut elements = Vec::with_capacity(array.elements.len());
                for element in &array.elements {
                    elements.push(match element {
                        Some(element) => Some(ArrayPatternElement {
                            target: self.visit_pattern(&element.target)?,
                            default: self.visit_default(element.default.as_ref())?,
                        }),
                        None => None,
                    });
                }
                Pattern::Array(ArrayPattern {
                    elements,
                    rest: self.visit_rest(array.rest.as_deref())?,
                })
            }
        })
    }

    fn visit_default(&mut self, default: Option<&Expr>) -> Result<Option<Expr>, TransformError> {
        default
            .map(|default| self.visit_expression(default, true))
            .transpose()
    }

    fn visit_rest(
        &mut self,
        rest: Option<&Pattern>,
    ) -> Result<Option<Box<Pattern>>, TransformError> {
        rest.map(|rest| self.visit_pattern(rest).map(Box::new))
            .transpose()
    }
}
