//! Line-oriented command language for the interactive session.
//!
//! Numbers are validated here, at the input boundary. The structures themselves assume
//! well-typed input.

use crate::bst::TraversalOrder;
use crate::error::CommandError;
use crate::hash_table::{CollisionPolicy, HashKey};
use crate::sorting::SortAlgorithm;
use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;

lazy_static! {
    static ref INT_REGEX: Regex = Regex::new(r"^[+-]?[0-9]+$").unwrap();
    static ref LIST_REGEX: Regex =
        Regex::new(r"^[+-]?[0-9]+(\s*,\s*[+-]?[0-9]+)*$").unwrap();
    static ref VERTEX_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Singly,
    Doubly,
    Circular,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOp {
    InsertHead(i64),
    InsertTail(i64),
    Delete(i64),
    Search(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    StackPush(i64),
    StackPop,
    StackPeek,
    QueueEnqueue(i64),
    QueueDequeue,
    QueueFront,
    List(ListKind, ListOp),
    HeapInsert(i64),
    HeapExtract,
    HeapBuild(Vec<i64>),
    HeapSort,
    HashNew(usize, CollisionPolicy),
    HashInsert(HashKey, i64),
    HashSearch(HashKey),
    HashDelete(HashKey),
    HashResize(usize),
    BstInsert(i64),
    BstSearch(i64),
    BstRemove(i64),
    BstTraverse(TraversalOrder),
    GraphEdge(String, String),
    GraphRemoveEdge(String, String),
    GraphRemoveVertex(String),
    GraphBfs(String),
    GraphDfs(String),
    GraphDfsIterative(String),
    GraphPath {
        start: String,
        end: String,
        breadth_first: bool,
    },
    GraphCycle,
    WeightedEdge(String, String, u64),
    Dijkstra(String, String),
    SearchArray(Vec<i64>),
    LinearSearch(i64),
    BinarySearch(i64),
    Sort(SortAlgorithm, Vec<i64>),
    Next,
    Prev,
    Goto(usize),
    Reset,
    Play,
    Steps,
    Show,
    Export,
    Help,
    Quit,
}

pub const HELP: &str = "\
Structures:
  stack push <n> | stack pop | stack peek
  queue enqueue <n> | queue dequeue | queue front
  list|dlist|clist head <n> | tail <n> | delete <n> | search <n>
  heap insert <n> | heap extract | heap build <n,n,...> | heap sort
  hash new <capacity> chaining|probing | hash insert <key> <n>
  hash search <key> | hash delete <key> | hash resize <capacity>
  bst insert <n> | bst search <n> | bst remove <n>
  bst inorder|preorder|postorder|levelorder
  graph edge <a> <b> | graph unedge <a> <b> | graph remove <v>
  graph bfs <v> | graph dfs <v> | graph dfsi <v> | graph path bfs|dfs <a> <b> | graph cycle
  wgraph edge <a> <b> <weight> | dijkstra <a> <b>
  search array <n,n,...> | search linear <n> | search binary <n>
  sort bubble|merge|quick <n,n,...>
Playback:
  next | prev | goto <step> | reset | play | steps | show | export
  help | q";

fn int(token: &str) -> Result<i64, CommandError> {
    if !INT_REGEX.is_match(token) {
        return Err(CommandError::InvalidNumber(token.to_string()));
    }
    token
        .parse()
        .map_err(|_| CommandError::InvalidNumber(token.to_string()))
}

fn count(token: &str) -> Result<usize, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidNumber(token.to_string()))
}

/// Comma separated integers; the tokens are rejoined so `5, 2, 9` also parses.
fn int_list(tokens: &[&str]) -> Result<Vec<i64>, CommandError> {
    let joined = tokens.join(" ");
    if !LIST_REGEX.is_match(&joined) {
        return Err(CommandError::InvalidNumber(joined));
    }
    joined.split(',').map(|n| int(n.trim())).collect()
}

fn vertex(token: &str, usage: &'static str) -> Result<String, CommandError> {
    if VERTEX_REGEX.is_match(token) {
        Ok(token.to_string())
    } else {
        Err(CommandError::Usage(usage))
    }
}

fn key(token: &str) -> HashKey {
    match token.parse::<i64>() {
        Ok(n) if INT_REGEX.is_match(token) => HashKey::Int(n),
        _ => HashKey::Str(token.to_string()),
    }
}

fn parse_list(kind: ListKind, args: &[&str]) -> Result<Command, CommandError> {
    const USAGE: &str = "list head|tail|delete|search <n>";
    let op = match args {
        ["head", n] => ListOp::InsertHead(int(n)?),
        ["tail", n] => ListOp::InsertTail(int(n)?),
        ["delete", n] => ListOp::Delete(int(n)?),
        ["search", n] => ListOp::Search(int(n)?),
        _ => return Err(CommandError::Usage(USAGE)),
    };
    Ok(Command::List(kind, op))
}

fn parse_graph(args: &[&str]) -> Result<Command, CommandError> {
    const USAGE: &str = "graph edge|unedge <a> <b> | graph remove|bfs|dfs|dfsi <v> | \
                         graph path bfs|dfs <a> <b> | graph cycle";
    Ok(match args {
        ["edge", a, b] => Command::GraphEdge(vertex(a, USAGE)?, vertex(b, USAGE)?),
        ["unedge", a, b] => Command::GraphRemoveEdge(vertex(a, USAGE)?, vertex(b, USAGE)?),
        ["remove", v] => Command::GraphRemoveVertex(vertex(v, USAGE)?),
        ["bfs", v] => Command::GraphBfs(vertex(v, USAGE)?),
        ["dfs", v] => Command::GraphDfs(vertex(v, USAGE)?),
        ["dfsi", v] => Command::GraphDfsIterative(vertex(v, USAGE)?),
        ["path", how @ ("bfs" | "dfs"), a, b] => Command::GraphPath {
            start: vertex(a, USAGE)?,
            end: vertex(b, USAGE)?,
            breadth_first: *how == "bfs",
        },
        ["cycle"] => Command::GraphCycle,
        _ => return Err(CommandError::Usage(USAGE)),
    })
}

fn parse_hash(args: &[&str]) -> Result<Command, CommandError> {
    const USAGE: &str = "hash new <capacity> chaining|probing | hash insert <key> <n> | \
                         hash search|delete <key> | hash resize <capacity>";
    Ok(match args {
        ["new", capacity, "chaining"] => {
            Command::HashNew(count(capacity)?, CollisionPolicy::SeparateChaining)
        }
        ["new", capacity, "probing"] => {
            Command::HashNew(count(capacity)?, CollisionPolicy::LinearProbing)
        }
        ["insert", k, n] => Command::HashInsert(key(k), int(n)?),
        ["search", k] => Command::HashSearch(key(k)),
        ["delete", k] => Command::HashDelete(key(k)),
        ["resize", capacity] => Command::HashResize(count(capacity)?),
        _ => return Err(CommandError::Usage(USAGE)),
    })
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, args)) = tokens.split_first() else {
        return Err(CommandError::Empty);
    };

    let command = match (head, args) {
        ("q" | "quit", []) => Command::Quit,
        ("help", []) => Command::Help,
        ("next" | "n", []) => Command::Next,
        ("prev" | "p", []) => Command::Prev,
        ("goto", [step]) => Command::Goto(count(step)?),
        ("goto", _) => return Err(CommandError::Usage("goto <step>")),
        ("reset", []) => Command::Reset,
        ("play", []) => Command::Play,
        ("steps", []) => Command::Steps,
        ("show", []) => Command::Show,
        ("export", []) => Command::Export,

        ("stack", ["push", n]) => Command::StackPush(int(n)?),
        ("stack", ["pop"]) => Command::StackPop,
        ("stack", ["peek"]) => Command::StackPeek,
        ("stack", _) => return Err(CommandError::Usage("stack push <n> | stack pop | stack peek")),

        ("queue", ["enqueue", n]) => Command::QueueEnqueue(int(n)?),
        ("queue", ["dequeue"]) => Command::QueueDequeue,
        ("queue", ["front"]) => Command::QueueFront,
        ("queue", _) => {
            return Err(CommandError::Usage(
                "queue enqueue <n> | queue dequeue | queue front",
            ));
        }

        ("list", _) => parse_list(ListKind::Singly, args)?,
        ("dlist", _) => parse_list(ListKind::Doubly, args)?,
        ("clist", _) => parse_list(ListKind::Circular, args)?,

        ("heap", ["insert", n]) => Command::HeapInsert(int(n)?),
        ("heap", ["extract"]) => Command::HeapExtract,
        ("heap", ["build", rest @ ..]) if !rest.is_empty() => Command::HeapBuild(int_list(rest)?),
        ("heap", ["sort"]) => Command::HeapSort,
        ("heap", _) => {
            return Err(CommandError::Usage(
                "heap insert <n> | heap extract | heap build <n,n,...> | heap sort",
            ));
        }

        ("hash", _) => parse_hash(args)?,

        ("bst", ["insert", n]) => Command::BstInsert(int(n)?),
        ("bst", ["search", n]) => Command::BstSearch(int(n)?),
        ("bst", ["remove", n]) => Command::BstRemove(int(n)?),
        ("bst", ["inorder"]) => Command::BstTraverse(TraversalOrder::Inorder),
        ("bst", ["preorder"]) => Command::BstTraverse(TraversalOrder::Preorder),
        ("bst", ["postorder"]) => Command::BstTraverse(TraversalOrder::Postorder),
        ("bst", ["levelorder"]) => Command::BstTraverse(TraversalOrder::LevelOrder),
        ("bst", _) => {
            return Err(CommandError::Usage(
                "bst insert|search|remove <n> | bst inorder|preorder|postorder|levelorder",
            ));
        }

        ("graph", _) => parse_graph(args)?,

        ("wgraph", ["edge", a, b, w]) => {
            const USAGE: &str = "wgraph edge <a> <b> <weight>";
            let weight = count(w)? as u64;
            Command::WeightedEdge(vertex(a, USAGE)?, vertex(b, USAGE)?, weight)
        }
        ("wgraph", _) => return Err(CommandError::Usage("wgraph edge <a> <b> <weight>")),
        ("dijkstra", [a, b]) => {
            const USAGE: &str = "dijkstra <a> <b>";
            Command::Dijkstra(vertex(a, USAGE)?, vertex(b, USAGE)?)
        }
        ("dijkstra", _) => return Err(CommandError::Usage("dijkstra <a> <b>")),

        ("search", ["array", rest @ ..]) if !rest.is_empty() => {
            Command::SearchArray(int_list(rest)?)
        }
        ("search", ["linear", n]) => Command::LinearSearch(int(n)?),
        ("search", ["binary", n]) => Command::BinarySearch(int(n)?),
        ("search", _) => {
            return Err(CommandError::Usage(
                "search array <n,n,...> | search linear|binary <n>",
            ));
        }

        ("sort", [how, rest @ ..]) if !rest.is_empty() => {
            let algorithm = match *how {
                "bubble" => SortAlgorithm::Bubble,
                "merge" => SortAlgorithm::Merge,
                "quick" => SortAlgorithm::Quick,
                _ => return Err(CommandError::Usage("sort bubble|merge|quick <n,n,...>")),
            };
            Command::Sort(algorithm, int_list(rest)?)
        }
        ("sort", _) => return Err(CommandError::Usage("sort bubble|merge|quick <n,n,...>")),

        (other, _) => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
