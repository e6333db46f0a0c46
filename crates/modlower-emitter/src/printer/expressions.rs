//! Expression and pattern printing.

use modlower_ast::{
    ArrowBody, BinaryOp, Expr, Lit, MemberProp, ObjectPatternProp, Param, Pattern, Prop, PropName,
    Template, UnaryOp,
};

use modlower_common::limits::{STACK_RED_ZONE, STACK_SEGMENT_SIZE};

use super::{Emit, Printer};

impl Emit for Expr {
    fn emit(&self, printer: &mut Printer) {
        printer.emit_expression(self);
    }
}

impl Printer {
    pub(crate) const PREC_SEQ: u8 = 0;
    pub(crate) const PREC_ASSIGN: u8 = 2;
    const PREC_CONDITIONAL: u8 = 3;
    const PREC_UNARY: u8 = 15;
    const PREC_POSTFIX: u8 = 16;
    const PREC_NEW: u8 = 17;
    pub(crate) const PREC_CALL: u8 = 18;
    const PREC_PRIMARY: u8 = 19;

    /// Binding power of `expr` as printed; higher binds tighter.
    fn precedence(expr: &Expr) -> u8 {
        match expr {
            Expr::Seq(_) => Self::PREC_SEQ,
            Expr::Yield { .. } | Expr::Arrow(_) | Expr::Assign { .. } | Expr::Spread(_) => {
                Self::PREC_ASSIGN
            }
            Expr::Conditional { .. } => Self::PREC_CONDITIONAL,
            Expr::Binary { op, .. } => op.precedence(),
            Expr::Unary { .. } | Expr::Await(_) | Expr::Update { prefix: true, .. } => {
                Self::PREC_UNARY
            }
            Expr::Update { prefix: false, .. } => Self::PREC_POSTFIX,
            Expr::New { args: None, .. } => Self::PREC_NEW,
            Expr::New { args: Some(_), .. }
            | Expr::Call { .. }
            | Expr::Member { .. }
            | Expr::TaggedTemplate { .. }
            | Expr::ImportCall(_) => Self::PREC_CALL,
            Expr::Ident(_)
            | Expr::Lit(_)
            | Expr::Template(_)
            | Expr::This
            | Expr::Super
            | Expr::Array(_)
            | Expr::Object(_)
            | Expr::Function(_)
            | Expr::Class(_)
            | Expr::Paren(_)
            | Expr::ImportMeta => Self::PREC_PRIMARY,
        }
    }

    pub(crate) fn emit_expression(&mut self, expr: &Expr) {
        self.emit_expression_at(expr, Self::PREC_SEQ);
    }

    /// Print `expr` in a slot that requires at least `min_precedence`,
    /// adding parentheses when it binds more loosely.
    pub(crate) fn emit_expression_at(&mut self, expr: &Expr, min_precedence: u8) {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || {
            if Self::precedence(expr) < min_precedence {
                self.write("(");
                self.emit_expression_inner(expr);
                self.write(")");
            } else {
                self.emit_expression_inner(expr);
            }
        });
    }

    fn emit_expression_inner(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(ident) => self.write(&ident.name),
            Expr::Lit(lit) => self.emit_literal(lit),
            Expr::Template(template) => self.emit_template(template),
            Expr::TaggedTemplate { tag, template } => {
                self.emit_expression_at(tag, Self::PREC_CALL);
                self.emit_template(template);
            }
            Expr::This => self.write("this"),
            Expr::Super => self.write("super"),
            Expr::Array(elements) => self.emit_array(elements),
            Expr::Object(props) => self.emit_object(props),
            Expr::Function(function) => self.emit_function(function),
            Expr::Arrow(arrow) => {
                if arrow.is_async {
                    self.write("async ");
                }
                self.emit_params(&arrow.params);
                self.write(" => ");
                match &arrow.body {
                    ArrowBody::Block(body) => self.emit_braced_body(body),
                    ArrowBody::Expr(body) => {
                        if matches!(**body, Expr::Object(_)) {
                            self.write("(");
                            self.emit_expression(body);
                            self.write(")");
                        } else {
                            self.emit_expression_at(body, Self::PREC_ASSIGN);
                        }
                    }
                }
            }
            Expr::Class(class) => self.emit_class(class),
            Expr::Unary { op, arg } => {
                self.write(op.as_str());
                if op.is_keyword() || unary_operands_merge(*op, arg) {
                    self.write(" ");
                }
                self.emit_expression_at(arg, Self::PREC_UNARY);
            }
            Expr::Update { op, prefix, arg } => {
                if *prefix {
                    self.write(op.as_str());
                    self.emit_expression_at(arg, Self::PREC_UNARY);
                } else {
                    self.emit_expression_at(arg, Self::PREC_NEW);
                    self.write(op.as_str());
                }
            }
            Expr::Binary { op, left, right } => self.emit_binary(*op, left, right),
            Expr::Assign { op, target, value } => {
                self.emit_pattern(target);
                self.write(" ");
                self.write(op.as_str());
                self.write(" ");
                self.emit_expression_at(value, Self::PREC_ASSIGN);
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                self.emit_expression_at(test, Self::PREC_CONDITIONAL + 1);
                self.write(" ? ");
                self.emit_expression_at(consequent, Self::PREC_ASSIGN);
                self.write(" : ");
                self.emit_expression_at(alternate, Self::PREC_ASSIGN);
            }
            Expr::Call {
                callee,
                args,
                optional,
            } => {
                self.emit_expression_at(callee, Self::PREC_CALL);
                if *optional {
                    self.write("?.");
                }
                self.emit_arguments(args);
            }
            Expr::New { callee, args } => {
                self.write("new ");
                if is_plain_new_callee(callee) {
                    self.emit_expression_inner(callee);
                } else {
                    self.write("(");
                    self.emit_expression(callee);
                    self.write(")");
                }
                if let Some(args) = args {
                    self.emit_arguments(args);
                }
            }
            Expr::Member {
                object,
                property,
                optional,
            } => {
                let needs_parens = Self::precedence(object) < Self::PREC_CALL
                    || matches!(&**object, Expr::Lit(Lit::Num(_)));
                if needs_parens {
                    self.write("(");
                    self.emit_expression(object);
                    self.write(")");
                } else {
                    self.emit_expression_inner(object);
                }
                match property {
                    MemberProp::Ident(name) => {
                        self.write(if *optional { "?." } else { "." });
                        self.write(name);
                    }
                    MemberProp::Computed(index) => {
                        if *optional {
                            self.write("?.");
                        }
                        self.write("[");
                        self.emit_expression(index);
                        self.write("]");
                    }
                }
            }
            Expr::Seq(exprs) => {
                for (i, expr) in exprs.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expression_at(expr, Self::PREC_ASSIGN);
                }
            }
            Expr::Paren(inner) => {
                self.write("(");
                self.emit_expression(inner);
                self.write(")");
            }
            Expr::Yield { arg, delegate } => {
                self.write(if *delegate { "yield*" } else { "yield" });
                if let Some(arg) = arg {
                    self.write(" ");
                    self.emit_expression_at(arg, Self::PREC_ASSIGN);
                }
            }
            Expr::Await(arg) => {
                self.write("await ");
                self.emit_expression_at(arg, Self::PREC_UNARY);
            }
            Expr::Spread(arg) => {
                self.write("...");
                self.emit_expression_at(arg, Self::PREC_ASSIGN);
            }
            Expr::ImportCall(specifier) => {
                self.write("import(");
                self.emit_expression_at(specifier, Self::PREC_ASSIGN);
                self.write(")");
            }
            Expr::ImportMeta => self.write("import.meta"),
        }
    }

    fn emit_literal(&mut self, lit: &Lit) {
        match lit {
            Lit::Str(text) => self.write_quoted(text),
            Lit::Num(text) => self.write(text),
            Lit::Bool(value) => self.write(if *value { "true" } else { "false" }),
            Lit::Null => self.write("null"),
            Lit::Regex { pattern, flags } => {
                self.write("/");
                self.write(pattern);
                self.write("/");
                self.write(flags);
            }
        }
    }

    fn emit_template(&mut self, template: &Template) {
        self.write("`");
        for (i, quasi) in template.quasis.iter().enumerate() {
            self.write(quasi);
            if let Some(expr) = template.exprs.get(i) {
                self.write("${");
                self.emit_expression(expr);
                self.write("}");
            }
        }
        self.write("`");
    }

    fn emit_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) {
        let precedence = op.precedence();
        let (left_min, right_min) = if op.is_right_associative() {
            (precedence + 1, precedence)
        } else {
            (precedence, precedence + 1)
        };

        if needs_mixing_parens(op, left) || (op == BinaryOp::Exp && is_unary_like(left)) {
            self.write("(");
            self.emit_expression(left);
            self.write(")");
        } else {
            self.emit_expression_at(left, left_min);
        }
        self.write(" ");
        self.write(op.as_str());
        self.write(" ");
        if needs_mixing_parens(op, right) {
            self.write("(");
            self.emit_expression(right);
            self.write(")");
        } else {
            self.emit_expression_at(right, right_min);
        }
    }

    fn emit_arguments(&mut self, args: &[Expr]) {
        self.write("(");
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expression_at(arg, Self::PREC_ASSIGN);
        }
        self.write(")");
    }

    /// Arrays holding a function print one element per line.
    fn emit_array(&mut self, elements: &[Option<Expr>]) {
        let multiline = elements
            .iter()
            .flatten()
            .any(|element| matches!(element, Expr::Function(_) | Expr::Arrow(_)));
        if multiline {
            self.write("[");
            self.write_line();
            self.increase_indent();
            for (i, element) in elements.iter().enumerate() {
                self.write_indent();
                if let Some(element) = element {
                    self.emit_expression_at(element, Self::PREC_ASSIGN);
                }
                if i + 1 < elements.len() {
                    self.write(",");
                }
                self.write_line();
            }
            self.decrease_indent();
            self.write_indent();
            self.write("]");
            return;
        }

        self.write("[");
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if let Some(element) = element {
                self.emit_expression_at(element, Self::PREC_ASSIGN);
            }
        }
        if matches!(elements.last(), Some(None)) {
            self.write(",");
        }
        self.write("]");
    }

    fn emit_object(&mut self, props: &[Prop]) {
        if props.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        for (i, prop) in props.iter().enumerate() {
            self.write_indent();
            self.emit_prop(prop);
            if i + 1 < props.len() {
                self.write(",");
            }
            self.write_line();
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    fn emit_prop(&mut self, prop: &Prop) {
        match prop {
            Prop::KeyValue { key, value } => {
                self.emit_prop_name(key);
                self.write(": ");
                self.emit_expression_at(value, Self::PREC_ASSIGN);
            }
            Prop::Shorthand(name) => self.write(&name.name),
            Prop::Method {
                key,
                kind,
                function,
            } => self.emit_method(key, *kind, function),
            Prop::Spread(expr) => {
                self.write("...");
                self.emit_expression_at(expr, Self::PREC_ASSIGN);
            }
        }
    }

    pub(crate) fn emit_prop_name(&mut self, key: &PropName) {
        match key {
            PropName::Ident(name) | PropName::Num(name) => self.write(name),
            PropName::Str(name) => self.write_quoted(name),
            PropName::Computed(expr) => {
                self.write("[");
                self.emit_expression_at(expr, Self::PREC_ASSIGN);
                self.write("]");
            }
        }
    }

    /// `(a, b = 1, ...rest)`
    pub(crate) fn emit_params(&mut self, params: &[Param]) {
        self.write("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if param.rest {
                self.write("...");
            }
            self.emit_pattern(&param.pattern);
            if let Some(default) = &param.default {
                self.write(" = ");
                self.emit_expression_at(default, Self::PREC_ASSIGN);
            }
        }
        self.write(")");
    }

    pub(crate) fn emit_pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Ident(ident) => self.write(&ident.name),
            Pattern::Expr(expr) => self.emit_expression_at(expr, Self::PREC_CALL),
            Pattern::Object(object) => {
                if object.props.is_empty() && object.rest.is_none() {
                    self.write("{}");
                    return;
                }
                self.write("{ ");
                for (i, prop) in object.props.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    match prop {
                        ObjectPatternProp::KeyValue {
                            key,
                            value,
                            default,
                        } => {
                            self.emit_prop_name(key);
                            self.write(": ");
                            self.emit_pattern(value);
                            self.emit_pattern_default(default.as_ref());
                        }
                        ObjectPatternProp::Shorthand { name, default } => {
                            self.write(&name.name);
                            self.emit_pattern_default(default.as_ref());
                        }
                    }
                }
                if let Some(rest) = &object.rest {
                    if !object.props.is_empty() {
                        self.write(", ");
                    }
                    self.write("...");
                    self.emit_pattern(rest);
                }
                self.write(" }");
            }
            Pattern::Array(array) => {
                self.write("[");
                for (i, element) in array.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(element) = element {
                        self.emit_pattern(&element.target);
                        self.emit_pattern_default(element.default.as_ref());
                    }
                }
                if let Some(rest) = &array.rest {
                    if !array.elements.is_empty() {
                        self.write(", ");
                    }
                    self.write("...");
                    self.emit_pattern(rest);
                } else if matches!(array.elements.last(), Some(None)) {
                    self.write(",");
                }
                self.write("]");
            }
        }
    }

    fn emit_pattern_default(&mut self, default: Option<&Expr>) {
        if let Some(default) = default {
            self.write(" = ");
            self.emit_expression_at(default, Self::PREC_ASSIGN);
        }
    }
}

/// `- -x` and `+ +x` must not print as a decrement or increment.
fn unary_operands_merge(op: UnaryOp, arg: &Expr) -> bool {
    let sign = match op {
        UnaryOp::Minus => "-",
        UnaryOp::Plus => "+",
        _ => return false,
    };
    match arg {
        Expr::Unary { op: inner, .. } => inner.as_str() == sign,
        Expr::Update {
            op: inner,
            prefix: true,
            ..
        } => inner.as_str().starts_with(sign),
        Expr::Lit(Lit::Num(text)) => text.starts_with(sign),
        _ => false,
    }
}

fn is_unary_like(expr: &Expr) -> bool {
    matches!(expr, Expr::Unary { .. } | Expr::Await(_))
}

/// `??` cannot be mixed with `&&` or `||` without parentheses.
fn needs_mixing_parens(op: BinaryOp, operand: &Expr) -> bool {
    let Expr::Binary { op: inner, .. } = operand else {
        return false;
    };
    match op {
        BinaryOp::Nullish => matches!(inner, BinaryOp::And | BinaryOp::Or),
        BinaryOp::And | BinaryOp::Or => *inner == BinaryOp::Nullish,
        _ => false,
    }
}

/// Callee of `new` that can be printed without parentheses: a member chain
/// with no call in it.
fn is_plain_new_callee(callee: &Expr) -> bool {
    match callee {
        Expr::Ident(_) | Expr::This | Expr::Paren(_) => true,
        Expr::Member { object, .. } => is_plain_new_callee(object),
        _ => false,
    }
}
