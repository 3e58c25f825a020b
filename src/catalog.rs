//! Pseudocode listings and complexity tables shown next to each visualization.
//!
//! Each [`Step`](crate::trace::Step) records the listing line its action corresponds to, so a
//! front end can highlight the code in sync with playback.

use crate::trace::Action;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Section of the visualizer an algorithm belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmType {
    Sorting,
    DataStructures,
    Trees,
    Graphs,
}

/// Every algorithm the crate can trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Stack,
    Queue,
    SinglyLinkedList,
    DoublyLinkedList,
    CircularLinkedList,
    MaxHeap,
    HashTable,
    BinarySearchTree,
    TreeTraversal,
    BreadthFirstSearch,
    DepthFirstSearch,
    Dijkstra,
    LinearSearch,
    BinarySearch,
    BubbleSort,
    MergeSort,
    QuickSort,
}

/// Asymptotic costs of an algorithm, as displayed in the complexity box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Complexity {
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
    pub space: &'static str,
    /// Per-operation costs, e.g. `("push", "O(1)")`.
    pub operations: &'static [(&'static str, &'static str)],
}

const STACK_CODE: &str = "\
push(item):
  items.append(item)
pop():
  if items is empty: return Underflow
  return items.remove_last()
peek():
  if items is empty: return \"Stack is empty\"
  return items.last()";

const QUEUE_CODE: &str = "\
enqueue(item):
  items.append(item)
dequeue():
  if items is empty: return Underflow
  return items.remove_first()
front():
  if items is empty: return \"Queue is empty\"
  return items.first()";

const SINGLY_CODE: &str = "\
insert(value):
  node = Node(value)
  walk to the insert position
  node.next = current.next; current.next = node
delete(value):
  walk until current.next.value == value
  current.next = current.next.next
search(value):
  if node.value == value: return index
  return -1";

const DOUBLY_CODE: &str = "\
insert(value):
  node = Node(value)
  if list is empty: head = tail = node
  link node at head or tail, fixing prev/next
delete(value):
  walk until node.value == value
  node.prev.next = node.next; node.next.prev = node.prev
search(value):
  if node.value == value: return index
  return -1";

const CIRCULAR_CODE: &str = "\
insert(value):
  node = Node(value)
  if list is empty: node.next = node; head = node
  walk to last (last.next == head)
  node.next = head; last.next = node
delete(value):
  walk once around comparing node.value
  prev.next = node.next; fix head and last
search(value):
  if node.value == value: return index
  return -1";

const HEAP_CODE: &str = "\
insert(value):
  heap.append(value)
  while parent(i) < heap[i]:
    swap(heap[i], heap[parent(i)])
extract_max():
  if heap is empty: return None
  max = heap[0]; heap[0] = heap.pop()
  sift down toward the larger child
  return max
build_heap(array):
  for i from n/2 - 1 down to 0: sift_down(i)
heap_sort():
  repeatedly extract_max and prepend it
  restore the original heap";

const HASH_TABLE_CODE: &str = "\
hash(key):
  int: key mod capacity; str: h = (h * 31 + code) mod capacity
insert(key, value):
  index = hash(key)
  chaining: update key in bucket or append (key, value)
  probing: while slot holds another key: index = (index + 1) mod capacity
search(key):
  walk the same slots; return value if key matches
delete(key):
  remove from bucket / clear the slot";

const BST_CODE: &str = "\
insert(node, value):
  if node is None: return Node(value)
  if value < node.value: node.left = insert(node.left, value)
  else: node.right = insert(node.right, value)
search(node, value):
  if node is None: return False
  if value == node.value: return True
  recurse into left or right subtree
remove(node, value):
  no child or one child: return the other child
  two children: node.value = min(node.right); remove it from node.right";

const TRAVERSAL_CODE: &str = "\
inorder(n): inorder(n.left); visit(n); inorder(n.right)
preorder(n): visit(n); preorder(n.left); preorder(n.right)
postorder(n): postorder(n.left); postorder(n.right); visit(n)
level_order(root): visit nodes level by level using a queue";

const BFS_CODE: &str = "\
bfs(start):
  queue = [start]; visited = {start}
  while queue:
    v = queue.pop_front(); result.append(v)
    for n in adj[v]:
      if n not in visited: visited.add(n); queue.push(n)
  return result";

const DFS_CODE: &str = "\
dfs(v):
  visited.add(v); result.append(v)
  for n in adj[v]:
    if n not in visited: dfs(n)
dfs_iterative(start):
  stack = [start]; visited = {start}
  while stack: v = stack.pop(); result.append(v)
    push every unvisited neighbour, marking it visited";

const DIJKSTRA_CODE: &str = "\
dist = {v: inf}; dist[start] = 0; pq = [(0, start)]
while pq:
  u = pq.pop_min()
  if u == end: break
  if u visited: continue; mark u visited
  for (n, w) in adj[u]:
    if dist[u] + w < dist[n]:
      dist[n] = dist[u] + w; prev[n] = u; pq.push((dist[n], n))
rebuild the path by following prev from end";

const LINEAR_SEARCH_CODE: &str = "\
for i in 0..len(arr):
  if arr[i] == target: return i
return -1";

const BINARY_SEARCH_CODE: &str = "\
left, right = 0, len(arr) - 1
while left <= right:
  mid = (left + right) // 2
  if arr[mid] == target: return mid
  elif arr[mid] < target: left = mid + 1
  else: right = mid - 1
return -1";

const BUBBLE_SORT_CODE: &str = "\
for i in 0..n-1:
  for j in 0..n-i-1:
    if arr[j] > arr[j+1]:
      swap(arr[j], arr[j+1])";

const MERGE_SORT_CODE: &str = "\
merge_sort(arr, left, right):
  if left < right:
    mid = (left + right) // 2; sort both halves
    merge(arr, left, mid, right)
merge: move the smaller head of the two halves into arr[k]
copy whatever remains of either half";

const QUICK_SORT_CODE: &str = "\
quick_sort(arr, low, high):
  if low < high: p = partition(arr, low, high); sort both sides
partition: pivot = arr[high]; i = low - 1
  for j in low..high: if arr[j] < pivot:
    i += 1; swap(arr[i], arr[j])
  swap(arr[i + 1], arr[high]); return i + 1";

impl Algorithm {
    pub const ALL: [Algorithm; 17] = [
        Algorithm::Stack,
        Algorithm::Queue,
        Algorithm::SinglyLinkedList,
        Algorithm::DoublyLinkedList,
        Algorithm::CircularLinkedList,
        Algorithm::MaxHeap,
        Algorithm::HashTable,
        Algorithm::BinarySearchTree,
        Algorithm::TreeTraversal,
        Algorithm::BreadthFirstSearch,
        Algorithm::DepthFirstSearch,
        Algorithm::Dijkstra,
        Algorithm::LinearSearch,
        Algorithm::BinarySearch,
        Algorithm::BubbleSort,
        Algorithm::MergeSort,
        Algorithm::QuickSort,
    ];

    /// Slug used in URLs and progress documents.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Stack => "stack",
            Algorithm::Queue => "queue",
            Algorithm::SinglyLinkedList => "linked-list",
            Algorithm::DoublyLinkedList => "doubly-linked-list",
            Algorithm::CircularLinkedList => "circular-linked-list",
            Algorithm::MaxHeap => "heap",
            Algorithm::HashTable => "hash-table",
            Algorithm::BinarySearchTree => "bst",
            Algorithm::TreeTraversal => "tree-traversal",
            Algorithm::BreadthFirstSearch => "bfs",
            Algorithm::DepthFirstSearch => "dfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::LinearSearch => "linear-search",
            Algorithm::BinarySearch => "binary-search",
            Algorithm::BubbleSort => "bubble-sort",
            Algorithm::MergeSort => "merge-sort",
            Algorithm::QuickSort => "quick-sort",
        }
    }

    pub fn algorithm_type(&self) -> AlgorithmType {
        match self {
            Algorithm::BubbleSort | Algorithm::MergeSort | Algorithm::QuickSort => {
                AlgorithmType::Sorting
            }
            Algorithm::BinarySearchTree | Algorithm::TreeTraversal => AlgorithmType::Trees,
            Algorithm::BreadthFirstSearch | Algorithm::DepthFirstSearch | Algorithm::Dijkstra => {
                AlgorithmType::Graphs
            }
            _ => AlgorithmType::DataStructures,
        }
    }

    pub fn pseudocode(&self) -> &'static str {
        match self {
            Algorithm::Stack => STACK_CODE,
            Algorithm::Queue => QUEUE_CODE,
            Algorithm::SinglyLinkedList => SINGLY_CODE,
            Algorithm::DoublyLinkedList => DOUBLY_CODE,
            Algorithm::CircularLinkedList => CIRCULAR_CODE,
            Algorithm::MaxHeap => HEAP_CODE,
            Algorithm::HashTable => HASH_TABLE_CODE,
            Algorithm::BinarySearchTree => BST_CODE,
            Algorithm::TreeTraversal => TRAVERSAL_CODE,
            Algorithm::BreadthFirstSearch => BFS_CODE,
            Algorithm::DepthFirstSearch => DFS_CODE,
            Algorithm::Dijkstra => DIJKSTRA_CODE,
            Algorithm::LinearSearch => LINEAR_SEARCH_CODE,
            Algorithm::BinarySearch => BINARY_SEARCH_CODE,
            Algorithm::BubbleSort => BUBBLE_SORT_CODE,
            Algorithm::MergeSort => MERGE_SORT_CODE,
            Algorithm::QuickSort => QUICK_SORT_CODE,
        }
    }

    /// Listing line (1-based) highlighted while a step with `action` is shown.
    pub fn line_for(&self, action: Action) -> Option<usize> {
        use Action::*;
        let line = match (self, action) {
            (Algorithm::Stack, Push) => 2,
            (Algorithm::Stack, NotFound) => 4,
            (Algorithm::Stack, Pop) => 5,

            (Algorithm::Queue, Enqueue) => 2,
            (Algorithm::Queue, NotFound) => 4,
            (Algorithm::Queue, Dequeue) => 5,

            (
                Algorithm::SinglyLinkedList
                | Algorithm::DoublyLinkedList
                | Algorithm::CircularLinkedList,
                a,
            ) => match a {
                Start => 2,
                Visit => 3,
                Insert => 4,
                Compare => 6,
                Remove => 7,
                Found => 9,
                NotFound => 10,
                _ => return None,
            },

            (Algorithm::MaxHeap, a) => match a {
                Insert => 2,
                Compare => 3,
                Swap => 4,
                NotFound => 6,
                Remove => 7,
                Visit => 8,
                Done => 9,
                Start => 11,
                Pop => 13,
                Update => 14,
                _ => return None,
            },

            (Algorithm::HashTable, a) => match a {
                Start => 2,
                Insert | Update => 5,
                Probe => 6,
                Compare | Found | NotFound => 8,
                Remove => 10,
                _ => return None,
            },

            (Algorithm::BinarySearchTree, a) => match a {
                Insert => 2,
                Compare => 3,
                NotFound => 6,
                Found => 7,
                Visit => 8,
                Remove => 10,
                Update => 11,
                _ => return None,
            },

            (Algorithm::TreeTraversal, Visit) => 1,

            (Algorithm::BreadthFirstSearch, a) => match a {
                Start => 2,
                Dequeue | Visit | Found => 4,
                Enqueue => 6,
                Done | NotFound => 7,
                _ => return None,
            },

            (Algorithm::DepthFirstSearch, a) => match a {
                Visit | Found => 2,
                Compare => 4,
                Start => 6,
                Pop => 7,
                Push => 8,
                _ => return None,
            },

            (Algorithm::Dijkstra, a) => match a {
                Start => 1,
                Dequeue => 3,
                Found => 4,
                Visit => 5,
                Compare => 7,
                Relax => 8,
                Done | NotFound => 9,
                _ => return None,
            },

            (Algorithm::LinearSearch, Compare | Found) => 2,
            (Algorithm::LinearSearch, NotFound) => 3,

            (Algorithm::BinarySearch, a) => match a {
                Start => 1,
                Compare => 3,
                Found => 4,
                NotFound => 7,
                _ => return None,
            },

            (Algorithm::BubbleSort, Compare) => 3,
            (Algorithm::BubbleSort, Swap) => 4,

            (Algorithm::MergeSort, a) => match a {
                Visit => 3,
                Compare | Update => 5,
                Insert => 6,
                _ => return None,
            },

            (Algorithm::QuickSort, a) => match a {
                Visit => 2,
                Start => 3,
                Compare => 4,
                Swap => 5,
                Update => 6,
                _ => return None,
            },

            _ => return None,
        };
        Some(line)
    }

    pub fn complexity(&self) -> Complexity {
        match self {
            Algorithm::Stack => Complexity {
                best: "O(1)",
                average: "O(1)",
                worst: "O(1)",
                space: "O(n)",
                operations: &[("push", "O(1)"), ("pop", "O(1)"), ("peek", "O(1)")],
            },
            Algorithm::Queue => Complexity {
                best: "O(1)",
                average: "O(1)",
                worst: "O(1)",
                space: "O(n)",
                operations: &[("enqueue", "O(1)"), ("dequeue", "O(1)"), ("front", "O(1)")],
            },
            Algorithm::SinglyLinkedList => Complexity {
                best: "O(1)",
                average: "O(n)",
                worst: "O(n)",
                space: "O(n)",
                operations: &[
                    ("insert_at_head", "O(1)"),
                    ("insert_at_tail", "O(n)"),
                    ("delete", "O(n)"),
                    ("search", "O(n)"),
                ],
            },
            Algorithm::DoublyLinkedList => Complexity {
                best: "O(1)",
                average: "O(n)",
                worst: "O(n)",
                space: "O(n)",
                operations: &[
                    ("insert_at_head", "O(1)"),
                    ("insert_at_tail", "O(1)"),
                    ("delete", "O(n)"),
                    ("search", "O(n)"),
                ],
            },
            Algorithm::CircularLinkedList => Complexity {
                best: "O(1)",
                average: "O(n)",
                worst: "O(n)",
                space: "O(n)",
                operations: &[
                    ("insert_at_head", "O(n)"),
                    ("insert_at_tail", "O(n)"),
                    ("delete", "O(n)"),
                    ("search", "O(n)"),
                ],
            },
            Algorithm::MaxHeap => Complexity {
                best: "O(n log n)",
                average: "O(n log n)",
                worst: "O(n log n)",
                space: "O(1)",
                operations: &[
                    ("insert", "O(log n)"),
                    ("extract_max", "O(log n)"),
                    ("build_heap", "O(n)"),
                    ("heap_sort", "O(n log n)"),
                ],
            },
            Algorithm::HashTable => Complexity {
                best: "O(1)",
                average: "O(1)",
                worst: "O(n)",
                space: "O(n)",
                operations: &[
                    ("insert", "O(1) average, O(n) worst"),
                    ("search", "O(1) average, O(n) worst"),
                    ("delete", "O(1) average, O(n) worst"),
                ],
            },
            Algorithm::BinarySearchTree => Complexity {
                best: "O(log n)",
                average: "O(log n)",
                worst: "O(n)",
                space: "O(n)",
                operations: &[("insert", "O(h)"), ("search", "O(h)"), ("delete", "O(h)")],
            },
            Algorithm::TreeTraversal => Complexity {
                best: "O(n)",
                average: "O(n)",
                worst: "O(n)",
                space: "O(n)",
                operations: &[
                    ("inorder", "O(n)"),
                    ("preorder", "O(n)"),
                    ("postorder", "O(n)"),
                    ("level_order", "O(n)"),
                ],
            },
            Algorithm::BreadthFirstSearch | Algorithm::DepthFirstSearch => Complexity {
                best: "O(V + E)",
                average: "O(V + E)",
                worst: "O(V + E)",
                space: "O(V)",
                operations: &[("traverse", "O(V + E)")],
            },
            Algorithm::Dijkstra => Complexity {
                best: "O((V + E) log V)",
                average: "O((V + E) log V)",
                worst: "O((V + E) log V)",
                space: "O(V)",
                operations: &[("shortest_path", "O((V + E) log V)")],
            },
            Algorithm::LinearSearch => Complexity {
                best: "O(1)",
                average: "O(n)",
                worst: "O(n)",
                space: "O(1)",
                operations: &[("search", "O(n)")],
            },
            Algorithm::BinarySearch => Complexity {
                best: "O(1)",
                average: "O(log n)",
                worst: "O(log n)",
                space: "O(1)",
                operations: &[("search", "O(log n)")],
            },
            Algorithm::BubbleSort => Complexity {
                best: "O(n)",
                average: "O(n²)",
                worst: "O(n²)",
                space: "O(1)",
                operations: &[("sort", "O(n²)")],
            },
            Algorithm::MergeSort => Complexity {
                best: "O(n log n)",
                average: "O(n log n)",
                worst: "O(n log n)",
                space: "O(n)",
                operations: &[("sort", "O(n log n)")],
            },
            Algorithm::QuickSort => Complexity {
                best: "O(n log n)",
                average: "O(n log n)",
                worst: "O(n²)",
                space: "O(log n)",
                operations: &[("sort", "O(n log n)")],
            },
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.name() == name)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
