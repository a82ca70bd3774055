//! Expression Serializer
//!
//! Turns a binding expression back into template syntax.

use super::ast::*;

pub fn serialize(ast: &AST) -> String {
    match ast {
        AST::EmptyExpr(_) | AST::ImplicitReceiver(_) => String::new(),
        AST::PropertyRead(p) => member(&p.receiver, ".", &p.name),
        AST::SafePropertyRead(p) => member(&p.receiver, "?.", &p.name),
        AST::KeyedRead(k) => format!("{}[{}]", serialize(&k.receiver), serialize(&k.key)),
        AST::LiteralPrimitive(l) => match &l.value {
            LiteralValue::String(s) => format!("'{}'", s.replace('\'', "\\'")),
            LiteralValue::Number(n) => n.to_string(),
            LiteralValue::Boolean(b) => b.to_string(),
            LiteralValue::Null => "null".to_string(),
        },
        AST::Interpolation(i) => {
            let mut out = String::new();
            for (index, text) in i.strings.iter().enumerate() {
                out.push_str(text);
                if let Some(expression) = i.expressions.get(index) {
                    out.push_str("{{ ");
                    out.push_str(&serialize(expression));
                    out.push_str(" }}");
                }
            }
            out
        }
        AST::Binary(b) => format!(
            "{} {} {}",
            serialize(&b.left),
            b.operation,
            serialize(&b.right)
        ),
        AST::PrefixNot(p) => format!("!{}", serialize(&p.expression)),
        AST::Conditional(c) => format!(
            "{} ? {} : {}",
            serialize(&c.condition),
            serialize(&c.true_exp),
            serialize(&c.false_exp)
        ),
        AST::Call(c) => format!("{}({})", serialize(&c.receiver), join(&c.args, ", ")),
        AST::BindingPipe(p) => {
            let mut out = format!("({} | {}", serialize(&p.exp), p.name);
            for arg in &p.args {
                out.push(':');
                out.push_str(&serialize(arg));
            }
            out.push(')');
            out
        }
    }
}

fn member(receiver: &AST, accessor: &str, name: &str) -> String {
    let receiver = serialize(receiver);
    if receiver.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", receiver, accessor, name)
    }
}

fn join(args: &[AST], separator: &str) -> String {
    args.iter().map(serialize).collect::<Vec<_>>().join(separator)
}
