use reef_analysis::{infer_types, parse, type_to_string, TypeKind, TypeMap};

fn infer(source: &str) -> TypeMap {
    let tree = parse(source);
    infer_types(source, &tree)
}

fn rendered(source: &str, name: &str) -> String {
    let types = infer(source);
    let descriptor = types
        .get(name)
        .unwrap_or_else(|| panic!("no entry for {name}, map: {types:?}"));
    type_to_string(descriptor)
}

#[test]
fn literal_initializers() {
    let source = "val a = 5\nval b = \"hi\"\nval c = true\n";
    assert_eq!(rendered(source, "a"), "Int");
    assert_eq!(rendered(source, "b"), "String");
    assert_eq!(rendered(source, "c"), "Bool");
}

// The type vocabulary has a single numeric kind, so a decimal literal is
// still Int.
#[test]
fn decimal_literals_are_int() {
    assert_eq!(rendered("val pi = 3.14\n", "pi"), "Int");
    assert_eq!(rendered("val neg = -7\n", "neg"), "Int");
}

#[test]
fn bare_declaration_stays_unknown_despite_later_reassignment() {
    let source = "var x\nx = 5\n";
    assert_eq!(rendered(source, "x"), "Unknown");
}

#[test]
fn annotated_declarations_win_over_inference() {
    let source = "val q: String = some + thing\n";
    let types = infer(source);
    let q = &types["q"];
    assert_eq!(q.kind, TypeKind::String);
    assert!(q.annotated);
}

#[test]
fn annotated_uninitialized_declaration_parses_nested_generics() {
    let source = "val table: MutableMap<String, List<Int>>\n";
    let types = infer(source);
    let table = &types["table"];
    assert!(table.annotated);
    assert_eq!(type_to_string(table), "MutableMap<String, List<Int>>");
}

#[test]
fn list_constructor_then_adds_refine_the_element_type() {
    let source = "val l = List.new()\nl.add(1)\nl.add(2)\n";
    assert_eq!(rendered(source, "l"), "List<Int>");
}

// First-seen element kind wins; the merge is deliberately not a union.
#[test]
fn conflicting_adds_keep_the_first_element_kind() {
    let source = "val l2 = List.new()\nl2.add(1)\nl2.add(\"a\")\n";
    assert_eq!(rendered(source, "l2"), "List<Int>");

    let flipped = "val l3 = List.new()\nl3.add(\"a\")\nl3.add(1)\n";
    assert_eq!(rendered(flipped, "l3"), "List<String>");
}

#[test]
fn add_on_an_unknown_receiver_is_not_guessed() {
    let source = "var u\nu.add(1)\n";
    assert_eq!(rendered(source, "u"), "Unknown");
}

#[test]
fn put_creates_a_map_entry_even_for_unknown_receivers() {
    let source = "var m\nm.put(\"k\", 1)\n";
    assert_eq!(rendered(source, "m"), "MutableMap<String, Int>");
}

#[test]
fn put_refines_an_existing_map_constructor() {
    let source = "val m2 = MutableMap.new()\nm2.put(\"k\", true)\n";
    assert_eq!(rendered(source, "m2"), "MutableMap<String, Bool>");
}

#[test]
fn put_does_not_clobber_a_known_non_map_receiver() {
    let source = "val s = \"text\"\ns.put(\"k\", 1)\n";
    assert_eq!(rendered(source, "s"), "String");
}

#[test]
fn set_constructor_and_add() {
    let source = "val seen = MutableSet.new()\nseen.add(\"x\")\n";
    assert_eq!(rendered(source, "seen"), "MutableSet<String>");
}

#[test]
fn constructor_generics_are_parsed_depth_aware() {
    let source = "val m = MutableMap<String, List<Int>>.new()\n";
    assert_eq!(rendered(source, "m"), "MutableMap<String, List<Int>>");
}

#[test]
fn user_constructors_infer_custom_types() {
    let source = "val p = Point.new()\nval b = Box<Int>.new()\n";
    assert_eq!(rendered(source, "p"), "Point");
    assert_eq!(rendered(source, "b"), "Box<Int>");
}

#[test]
fn known_function_calls_take_the_declared_return_type() {
    let source = "\
actor Api {
  fun make(): List<Int> {
  }
  fun fire() {
  }
}
val l = make()
val v = fire()
";
    assert_eq!(rendered(source, "l"), "List<Int>");
    // No return annotation: no table entry, and a call expression is not
    // a bare identifier, so the initializer stays Unknown.
    assert_eq!(rendered(source, "v"), "Unknown");
}

#[test]
fn unresolved_identifiers_default_to_unit() {
    let source = "val z = w\n";
    let types = infer(source);
    assert_eq!(types["z"].kind, TypeKind::Unit);
}

#[test]
fn binary_folding_is_kind_only() {
    assert_eq!(rendered("val r = 1 + 2 * 3\n", "r"), "Int");
    assert_eq!(rendered("val s = \"a\" + \"b\"\n", "s"), "String");
    assert_eq!(rendered("val t = \"a\" - \"b\"\n", "t"), "Unknown");
    assert_eq!(rendered("val m = 1 + \"b\"\n", "m"), "Unknown");
}

#[test]
fn unary_signs_attach_to_their_operand() {
    assert_eq!(rendered("val d = 1 + -2\n", "d"), "Int");
    assert_eq!(rendered("val e = -1 - -2\n", "e"), "Int");
}

#[test]
fn binary_results_never_overwrite_resolved_types() {
    // `total` resolves via its annotation; the Unknown fold result from
    // the unresolvable operands must not replace it.
    let source = "val total: Int = left + right\n";
    let types = infer(source);
    assert_eq!(types["total"].kind, TypeKind::Int);
}

#[test]
fn every_declared_variable_appears_in_the_map() {
    let source = "\
actor App {
  fun run() {
    var pending
    val done = true
  }
}
";
    let types = infer(source);
    assert_eq!(types["pending"].kind, TypeKind::Unknown);
    assert_eq!(types["done"].kind, TypeKind::Bool);
}

#[test]
fn unparsed_initializers_are_unknown_not_errors() {
    let source = "val odd = ???~!\n";
    assert_eq!(rendered(source, "odd"), "Unknown");
}
