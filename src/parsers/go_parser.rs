//! Filepath: src/parsers/go_parser.rs
//! Go source → `Document` using tree-sitter-go.

use tree_sitter::{Language, Node, Parser, Query, QueryCursor, StreamingIterator, Tree};

use crate::core::contract::{ContractMethod, ContractSpec, Field, Signature};
use crate::core::document::{
    DeclKind, Declaration, DocBlock, Document, FunctionDecl, Receiver, Span,
};
use crate::error::{GenError, Result, SyntaxError};
use crate::infra::utils::TsNodeUtils;

pub struct GoParser {
    language: Language,
    // Nodes whose interior lines must survive formatting untouched.
    literals_query: Query,
}

impl GoParser {
    pub fn new() -> Result<Self> {
        let language = tree_sitter_go::LANGUAGE.into();

        let literals_query = Query::new(
            &language,
            r#"
            (raw_string_literal) @literal
            (comment)            @literal
            "#,
        )
        .map_err(|e| GenError::Grammar(e.to_string()))?;

        Ok(Self {
            language,
            literals_query,
        })
    }

    /// Parse `text` and reject anything that is not a complete Go file.
    pub fn parse_tree(&self, text: &str) -> Result<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| GenError::Grammar(e.to_string()))?;

        let tree = parser
            .parse(text, None)
            .ok_or_else(|| GenError::Grammar("parser returned no tree".into()))?;
        let root = tree.root_node();

        if let Some(bad) = TsNodeUtils::first_error(root) {
            let message = if bad.is_missing() {
                format!("missing {}", bad.kind())
            } else {
                "unexpected input".to_string()
            };
            return Err(node_error(text, bad, message).into());
        }

        // go/parser insists on a package clause before anything else
        {
            let mut cursor = root.walk();
            let first = root
                .named_children(&mut cursor)
                .find(|n| n.kind() != "comment");
            match first {
                Some(n) if n.kind() == "package_clause" => {}
                Some(n) => return Err(node_error(text, n, "expected 'package'").into()),
                None => {
                    return Err(SyntaxError::at(text, 0, 1, (1, 1), "expected 'package'").into());
                }
            }
        }

        Ok(tree)
    }

    /// 0-based inclusive row ranges of raw strings and comments that span
    /// more than one line.
    pub fn multiline_literals(&self, tree: &Tree, text: &str) -> Vec<(usize, usize)> {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.literals_query, tree.root_node(), text.as_bytes());

        let mut rows = Vec::new();
        while let Some(m) = matches.next() {
            for cap in m.captures {
                let start = cap.node.start_position().row;
                let end = cap.node.end_position().row;
                if end > start {
                    rows.push((start, end));
                }
            }
        }

        rows
    }

    /// Parse `text` into a `Document`.
    pub fn parse(&self, text: &str) -> Result<Document> {
        let tree = self.parse_tree(text)?;
        let decls = DeclCollector::new(text).collect(tree.root_node());

        Ok(Document::new(text.to_string(), decls))
    }
}

fn node_error(text: &str, node: Node, message: impl Into<String>) -> SyntaxError {
    let pos = node.start_position();
    SyntaxError::at(
        text,
        node.start_byte(),
        node.end_byte() - node.start_byte(),
        (pos.row + 1, pos.column + 1),
        message,
    )
}

/// Walks the top level of a source file and builds declarations.
struct DeclCollector<'s> {
    bytes: &'s [u8],
    lines: Vec<&'s str>,
}

impl<'s> DeclCollector<'s> {
    fn new(text: &'s str) -> Self {
        Self {
            bytes: text.as_bytes(),
            lines: text.split('\n').collect(),
        }
    }

    fn collect(&self, root: Node) -> Vec<Declaration> {
        let mut out = Vec::new();
        let mut run: Vec<Node> = Vec::new();
        let mut prev_end_row: Option<usize> = None;

        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            if node.kind() == "comment" {
                let row = node.start_position().row;

                // Trailing comment on the previous declaration's last line
                if prev_end_row == Some(row) {
                    run.clear();
                    continue;
                }

                let adjacent = run
                    .last()
                    .is_some_and(|last| last.end_position().row + 1 == row);
                if !adjacent {
                    run.clear();
                }
                run.push(node);
                continue;
            }

            let doc = self.doc_block(&run, node);
            run.clear();
            prev_end_row = Some(node.end_position().row);

            self.declarations_of(node, doc, &mut out);
        }

        out
    }

    /// The comment run is a doc block only if it ends on the line right
    /// above `node`.
    fn doc_block(&self, run: &[Node], node: Node) -> Option<DocBlock> {
        let first = run.first()?;
        let last = run.last()?;

        if last.end_position().row + 1 != node.start_position().row {
            return None;
        }

        let (first_row, last_row) = (first.start_position().row, last.end_position().row);
        Some(DocBlock {
            first_line: first_row + 1,
            last_line: last_row + 1,
            text: self.lines[first_row..=last_row].join("\n"),
        })
    }

    fn declarations_of(&self, node: Node, doc: Option<DocBlock>, out: &mut Vec<Declaration>) {
        let (start_line, end_line) = TsNodeUtils::line_range_1based(node);
        let span = Span {
            start_line,
            start_column: node.start_position().column + 1,
            end_line,
        };
        let grouped = is_grouped(node);

        let mut push = |name: &str, kind: DeclKind, grouped: bool| {
            out.push(Declaration {
                name: name.to_string(),
                kind,
                doc: doc.clone(),
                span,
                grouped,
            })
        };

        match node.kind() {
            "function_declaration" => {
                let name = TsNodeUtils::field_text(node, "name", self.bytes).unwrap_or("");
                let func = FunctionDecl {
                    receivers: None,
                    params: self.params_of(node),
                    results: self.results_of(node),
                };
                push(name, DeclKind::Function(func), false);
            }

            "method_declaration" => {
                let name = TsNodeUtils::field_text(node, "name", self.bytes).unwrap_or("");
                let receivers = node
                    .child_by_field_name("receiver")
                    .map(|list| self.receivers_of(list))
                    .unwrap_or_default();
                let func = FunctionDecl {
                    receivers: Some(receivers),
                    params: self.params_of(node),
                    results: self.results_of(node),
                };
                push(name, DeclKind::Function(func), false);
            }

            "type_declaration" => {
                let specs = specs_of(node, &["type_spec", "type_alias"]);
                let shared = grouped && specs.len() > 1;

                for spec in specs {
                    let Some(name) = TsNodeUtils::field_text(spec, "name", self.bytes) else {
                        continue;
                    };

                    let kind = match spec.child_by_field_name("type") {
                        Some(ty) if ty.kind() == "interface_type" => {
                            let mut contract = self.contract_of(ty);
                            contract.type_params =
                                TsNodeUtils::field_text(spec, "type_parameters", self.bytes)
                                    .map(str::to_string);
                            contract.alias = spec.kind() == "type_alias";
                            DeclKind::Contract(contract)
                        }
                        _ => DeclKind::Type,
                    };
                    push(name, kind, shared);
                }
            }

            "var_declaration" | "const_declaration" => {
                let specs = specs_of(node, &["var_spec", "const_spec"]);
                let shared = grouped && specs.len() > 1;

                for spec in specs {
                    for name in TsNodeUtils::field_texts(spec, "name", self.bytes) {
                        push(&name, DeclKind::Value, shared);
                    }
                }
            }

            // package clause, imports
            _ => {}
        }
    }

    fn receivers_of(&self, list: Node) -> Vec<Receiver> {
        let mut cursor = list.walk();

        list.named_children(&mut cursor)
            .filter(|c| {
                matches!(
                    c.kind(),
                    "parameter_declaration" | "variadic_parameter_declaration"
                )
            })
            .map(|decl| {
                let binding = TsNodeUtils::field_text(decl, "name", self.bytes).map(str::to_string);
                let (type_name, pointer) = match decl.child_by_field_name("type") {
                    Some(ty) => self.receiver_type(ty),
                    None => (None, false),
                };

                Receiver {
                    binding,
                    type_name,
                    pointer,
                }
            })
            .collect()
    }

    /// `T` → (T, false), `*T` → (T, true), anything else (generics,
    /// parenthesized forms) → no name.
    fn receiver_type(&self, ty: Node) -> (Option<String>, bool) {
        match ty.kind() {
            "type_identifier" => (Some(TsNodeUtils::text(ty, self.bytes).to_string()), false),
            "pointer_type" => match ty.named_child(0) {
                Some(inner) if inner.kind() == "type_identifier" => {
                    (Some(TsNodeUtils::text(inner, self.bytes).to_string()), true)
                }
                _ => (None, true),
            },
            _ => (None, false),
        }
    }

    fn params_of(&self, node: Node) -> Vec<Field> {
        node.child_by_field_name("parameters")
            .map(|list| self.fields_of(list))
            .unwrap_or_default()
    }

    fn results_of(&self, node: Node) -> Vec<Field> {
        match node.child_by_field_name("result") {
            None => Vec::new(),
            Some(list) if list.kind() == "parameter_list" => self.fields_of(list),
            Some(ty) => vec![Field::unnamed(TsNodeUtils::text(ty, self.bytes))],
        }
    }

    fn fields_of(&self, list: Node) -> Vec<Field> {
        let mut cursor = list.walk();
        let mut out = Vec::new();

        for decl in list.named_children(&mut cursor) {
            let ty = TsNodeUtils::field_text(decl, "type", self.bytes).unwrap_or("");
            let names = TsNodeUtils::field_texts(decl, "name", self.bytes);

            match decl.kind() {
                "parameter_declaration" => out.push(Field {
                    names,
                    ty: ty.to_string(),
                }),
                "variadic_parameter_declaration" => out.push(Field {
                    names,
                    ty: format!("...{ty}"),
                }),
                // comments
                _ => {}
            }
        }

        out
    }

    fn contract_of(&self, iface: Node) -> ContractSpec {
        enum Last {
            Method(String, usize),
            Embed(usize),
            Nothing,
        }

        let mut spec = ContractSpec::default();
        let mut comments: Vec<String> = Vec::new();
        let mut last = Last::Nothing;

        let mut cursor = iface.walk();
        for elem in iface.named_children(&mut cursor) {
            let text = TsNodeUtils::text(elem, self.bytes).to_string();
            let row = elem.start_position().row;
            let end_row = elem.end_position().row;

            match elem.kind() {
                "comment" => match &last {
                    Last::Method(name, r) if *r == row => {
                        if let Some(m) = spec.get_mut(name) {
                            m.trailing = Some(text);
                        }
                    }
                    Last::Embed(r) if *r == row => {
                        if let Some(embed) = spec.embeds.last_mut() {
                            embed.push(' ');
                            embed.push_str(&text);
                        }
                    }
                    _ => comments.push(text),
                },

                "method_elem" | "method_spec" => {
                    let name = TsNodeUtils::field_text(elem, "name", self.bytes)
                        .unwrap_or("")
                        .to_string();
                    let method = ContractMethod {
                        signature: Signature {
                            params: self.params_of(elem),
                            results: self.results_of(elem),
                        },
                        comments: std::mem::take(&mut comments),
                        trailing: None,
                    };

                    last = if spec.insert(name.clone(), method) {
                        Last::Method(name, end_row)
                    } else {
                        Last::Nothing
                    };
                }

                // Embedded interfaces and type-set terms stay verbatim
                _ => {
                    spec.embeds.append(&mut comments);
                    spec.embeds.push(text);
                    last = Last::Embed(end_row);
                }
            }
        }

        spec.dangling = comments;
        spec
    }
}

/// `type ( ... )`, `var ( ... )`: the paren sits on the declaration or on
/// a `*_spec_list` child depending on grammar version.
fn is_grouped(node: Node) -> bool {
    let mut cursor = node.walk();

    TsNodeUtils::has_token(node, "(")
        || node
            .named_children(&mut cursor)
            .any(|c| c.kind().ends_with("_spec_list"))
}

/// Spec nodes of a declaration, looking through `*_spec_list` wrappers
/// that newer grammars put around parenthesized groups.
fn specs_of<'t>(node: Node<'t>, kinds: &[&str]) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let mut out = Vec::new();

    for child in node.named_children(&mut cursor) {
        if kinds.contains(&child.kind()) {
            out.push(child);
        } else if child.kind().ends_with("_spec_list") {
            out.extend(specs_of(child, kinds));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: &str = "package main

import \"io\"

// example is a thing.
// It does stuff.
type example struct{}

func helper() {}

func (e example) First() {}

func (e *example) Second(one, two string) (named example, other example) {
\treturn e, e
}

// Reader reads.
type Reader interface {
\tio.Closer
\t// Read reads.
\tRead(p []byte) (n int, err error) // hot
\tSize() int
\t// trailing note
}

var x, y = 1, 2

type (
\tA int
\tB interface{ M() }
)
";

    fn parse(src: &str) -> Document {
        GoParser::new().unwrap().parse(src).unwrap()
    }

    #[test]
    fn collects_top_level_declarations() {
        let doc = parse(SRC);
        let names: Vec<&str> = doc
            .declarations()
            .iter()
            .map(|d| d.name.as_str())
            .collect();

        assert_eq!(
            names,
            vec!["example", "helper", "First", "Second", "Reader", "x", "y", "A", "B"]
        );
    }

    #[test]
    fn doc_block_spans_adjacent_comments() {
        let doc = parse(SRC);
        let example = doc.lookup("example").unwrap();

        let block = example.doc.as_ref().unwrap();
        assert_eq!((block.first_line, block.last_line), (5, 6));
        assert_eq!(block.text, "// example is a thing.\n// It does stuff.");
        assert_eq!(example.first_line(), 5);
        assert_eq!(example.span.start_line, 7);

        assert!(doc.lookup("helper").unwrap().doc.is_none());
    }

    #[test]
    fn receivers_and_result_fields() {
        let doc = parse(SRC);
        let second = doc
            .declarations()
            .iter()
            .find(|d| d.name == "Second")
            .unwrap();

        let DeclKind::Function(f) = &second.kind else {
            panic!("expected a function");
        };
        let recv = &f.receivers.as_ref().unwrap()[0];
        assert_eq!(recv.binding.as_deref(), Some("e"));
        assert_eq!(recv.type_name.as_deref(), Some("example"));
        assert!(recv.pointer);

        assert_eq!(f.params, vec![Field::named(&["one", "two"], "string")]);
        assert_eq!(
            f.results,
            vec![
                Field::named(&["named"], "example"),
                Field::named(&["other"], "example")
            ]
        );
    }

    #[test]
    fn interface_body_keeps_embeds_and_comments() {
        let doc = parse(SRC);
        let DeclKind::Contract(spec) = &doc.lookup("Reader").unwrap().kind else {
            panic!("expected a contract");
        };

        assert_eq!(spec.embeds, vec!["io.Closer".to_string()]);
        assert_eq!(spec.names().collect::<Vec<_>>(), vec!["Read", "Size"]);
        assert_eq!(spec.dangling, vec!["// trailing note".to_string()]);

        let read = spec.get("Read").unwrap();
        assert_eq!(read.comments, vec!["// Read reads.".to_string()]);
        assert_eq!(read.trailing.as_deref(), Some("// hot"));
        assert_eq!(read.signature.render(), "(p []byte) (n int, err error)");
    }

    #[test]
    fn grouped_specs_share_the_group_span() {
        let doc = parse(SRC);
        let a = doc.lookup("A").unwrap();
        let b = doc.lookup("B").unwrap();

        assert!(a.grouped && b.grouped);
        assert_eq!(a.span, b.span);
        assert!(matches!(b.kind, DeclKind::Contract(_)));
        assert!(!doc.lookup("Reader").unwrap().grouped);
    }

    #[test]
    fn single_spec_group_is_not_shared() {
        let doc = parse("package main\n\ntype (\n\tI interface{ Old() }\n)\n");
        let i = doc.lookup("I").unwrap();

        assert!(!i.grouped);
        assert_eq!((i.span.start_line, i.span.end_line), (3, 5));
    }

    #[test]
    fn alias_interface_is_a_contract() {
        let doc = parse("package main\n\ntype I = interface{ Old() }\n\ntype N = int\n");
        let DeclKind::Contract(spec) = &doc.lookup("I").unwrap().kind else {
            panic!("expected a contract");
        };

        assert!(spec.alias);
        assert_eq!(spec.names().collect::<Vec<_>>(), vec!["Old"]);
        assert!(matches!(doc.lookup("N").unwrap().kind, DeclKind::Type));
    }

    #[test]
    fn rejects_broken_source() {
        let err = GoParser::new()
            .unwrap()
            .parse("package main\n\nfunc (e example) First( {\n")
            .unwrap_err();
        assert!(matches!(err, GenError::Syntax(_)));

        let err = GoParser::new()
            .unwrap()
            .parse("type T int\n")
            .unwrap_err();
        let GenError::Syntax(e) = err else {
            panic!("expected syntax error");
        };
        assert_eq!(e.message, "expected 'package'");
    }

    #[test]
    fn multiline_literals_are_reported() {
        let src = "package p\n\nvar s = `a\nb  \nc`\n\n/* one\ntwo */\n";
        let parser = GoParser::new().unwrap();
        let tree = parser.parse_tree(src).unwrap();

        let mut rows = parser.multiline_literals(&tree, src);
        rows.sort();
        assert_eq!(rows, vec![(2, 4), (6, 7)]);
    }
}
