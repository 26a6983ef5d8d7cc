//! Highlight queries for grammars whose crates ship none, or ship ones
//! written against a different grammar revision than the one pinned here.
//! Everything else uses the query constant exported by the grammar crate.

pub const JAVASCRIPT: &str = r#"
(comment) @comment
[(string) (template_string)] @string
(regex) @string.special
(number) @number
[(true) (false) (null) (undefined)] @constant.builtin

(function_declaration name: (identifier) @function)
(method_definition name: (property_identifier) @function.method)
(call_expression function: (identifier) @function)
(call_expression function: (member_expression property: (property_identifier) @function.method))

[(property_identifier) (shorthand_property_identifier)] @property

(jsx_opening_element name: (identifier) @tag)
(jsx_closing_element name: (identifier) @tag)
(jsx_self_closing_element name: (identifier) @tag)
(jsx_attribute (property_identifier) @attribute)

["const" "let" "var" "function" "class" "extends" "async" "await" "return"
 "if" "else" "for" "while" "do" "switch" "case" "default" "break" "continue"
 "try" "catch" "finally" "throw" "new" "delete" "typeof" "instanceof"
 "in" "of" "import" "export" "from" "void"] @keyword

["(" ")" "[" "]" "{" "}"] @punctuation.bracket
["." "," ";" ":"] @punctuation.delimiter
"#;

pub const TYPESCRIPT: &str = r#"
(comment) @comment
[(string) (template_string)] @string
(regex) @string.special
(number) @number
[(true) (false) (null) (undefined)] @constant.builtin

(type_identifier) @type
(predefined_type) @type.builtin

(function_declaration name: (identifier) @function)
(method_definition name: (property_identifier) @function.method)
(call_expression function: (identifier) @function)
(call_expression function: (member_expression property: (property_identifier) @function.method))

[(property_identifier) (shorthand_property_identifier)
 (shorthand_property_identifier_pattern)] @property

["const" "let" "var" "function" "class" "interface" "type" "enum" "namespace"
 "module" "declare" "implements" "extends" "public" "private" "protected"
 "readonly" "static" "abstract" "async" "await" "return" "if" "else" "for"
 "while" "do" "switch" "case" "default" "break" "continue" "try" "catch"
 "finally" "throw" "new" "delete" "typeof" "instanceof" "in" "of" "as" "is"
 "import" "export" "from" "void"] @keyword

["(" ")" "[" "]" "{" "}"] @punctuation.bracket
["." "," ";" ":"] @punctuation.delimiter
"#;

pub const TSX: &str = r#"
(comment) @comment
[(string) (template_string)] @string
(regex) @string.special
(number) @number
[(true) (false) (null) (undefined)] @constant.builtin

(type_identifier) @type
(predefined_type) @type.builtin

(function_declaration name: (identifier) @function)
(method_definition name: (property_identifier) @function.method)
(call_expression function: (identifier) @function)
(call_expression function: (member_expression property: (property_identifier) @function.method))

(jsx_opening_element name: (identifier) @tag)
(jsx_closing_element name: (identifier) @tag)
(jsx_self_closing_element name: (identifier) @tag)
(jsx_attribute (property_identifier) @attribute)

[(property_identifier) (shorthand_property_identifier)
 (shorthand_property_identifier_pattern)] @property

["const" "let" "var" "function" "class" "interface" "type" "enum" "namespace"
 "module" "declare" "implements" "extends" "public" "private" "protected"
 "readonly" "static" "abstract" "async" "await" "return" "if" "else" "for"
 "while" "do" "switch" "case" "default" "break" "continue" "try" "catch"
 "finally" "throw" "new" "delete" "typeof" "instanceof" "in" "of" "as" "is"
 "import" "export" "from" "void"] @keyword

["(" ")" "[" "]" "{" "}"] @punctuation.bracket
["." "," ";" ":"] @punctuation.delimiter
"#;

pub const JSON: &str = r#"
(pair key: (string) @property)
(string) @string
(number) @number
[(true) (false) (null)] @constant.builtin
["[" "]" "{" "}"] @punctuation.bracket
[":" ","] @punctuation.delimiter
"#;

pub const CSS: &str = r#"
(comment) @comment
(string_value) @string
[(integer_value) (float_value)] @number
(color_value) @constant
(property_name) @property
(tag_name) @tag
(class_name) @type
(id_name) @constant
(at_keyword) @keyword
"#;

pub const HTML: &str = r#"
(comment) @comment
(quoted_attribute_value) @string
(tag_name) @tag
(attribute_name) @attribute
"#;

pub const TOML: &str = r#"
(comment) @comment
(string) @string
[(integer) (float)] @number
(boolean) @constant.builtin
[(bare_key) (dotted_key)] @property
"#;

pub const RUBY: &str = r#"
(comment) @comment
[(string) (bare_string) (subshell) (heredoc_body) (heredoc_beginning)] @string
[(simple_symbol) (delimited_symbol) (hash_key_symbol) (bare_symbol)
 (regex)] @string.special
[(integer) (float)] @number
[(nil) (true) (false)] @constant.builtin
(constant) @type
[(instance_variable) (class_variable)] @property
[(global_variable) (self) (super)] @variable.builtin

(method name: (identifier) @function)
(singleton_method name: (identifier) @function)
(call method: (identifier) @function.method)
(method_parameters (identifier) @variable.parameter)
(block_parameters (identifier) @variable.parameter)

["alias" "and" "begin" "break" "case" "class" "def" "do" "else" "elsif" "end"
 "ensure" "for" "if" "in" "module" "next" "not" "or" "rescue" "retry" "return"
 "then" "unless" "until" "when" "while" "yield"] @keyword

["(" ")" "[" "]" "{" "}"] @punctuation.bracket
["," ";" "." "::"] @punctuation.delimiter
"#;

pub const C_SHARP: &str = r#"
(comment) @comment
[(string_literal) (verbatim_string_literal) (interpolated_string_expression)
 (character_literal)] @string
[(integer_literal) (real_literal)] @number
[(boolean_literal) (null_literal)] @constant.builtin
(predefined_type) @type.builtin

(class_declaration name: (identifier) @type)
(struct_declaration name: (identifier) @type)
(interface_declaration name: (identifier) @type)
(enum_declaration name: (identifier) @type)
(record_declaration name: (identifier) @type)

(method_declaration name: (identifier) @function)
(constructor_declaration name: (identifier) @function)
(invocation_expression function: (identifier) @function)
(invocation_expression function: (member_access_expression name: (identifier) @function.method))
(property_declaration name: (identifier) @property)
(parameter name: (identifier) @variable.parameter)
(attribute) @attribute

["abstract" "as" "async" "await" "base" "break" "case" "catch" "class" "const"
 "continue" "default" "delegate" "do" "else" "enum" "event" "explicit" "extern"
 "finally" "fixed" "for" "foreach" "goto" "if" "implicit" "in" "interface"
 "internal" "is" "lock" "namespace" "new" "operator" "out" "override" "params"
 "private" "protected" "public" "readonly" "record" "ref" "return" "sealed"
 "sizeof" "stackalloc" "static" "struct" "switch" "this" "throw" "try" "typeof"
 "unchecked" "unsafe" "using" "var" "virtual" "volatile" "when" "where" "while"
 "yield"] @keyword

["(" ")" "[" "]" "{" "}"] @punctuation.bracket
["." "," ";" ":"] @punctuation.delimiter
"#;

pub const MARKDOWN: &str = r#"
[(atx_heading) (setext_heading)] @keyword
(thematic_break) @punctuation.delimiter
[(fenced_code_block) (indented_code_block)] @string
(block_quote) @comment
[(list_marker_plus) (list_marker_minus) (list_marker_star) (list_marker_dot)
 (list_marker_parenthesis)] @punctuation
[(link_destination) (link_title)] @string
"#;

pub const YAML: &str = r#"
(comment) @comment
(block_mapping_pair key: (flow_node (plain_scalar (string_scalar) @property)))
(block_mapping_pair key: (flow_node [(double_quote_scalar) (single_quote_scalar)] @property))
[(double_quote_scalar) (single_quote_scalar) (string_scalar)
 (block_scalar)] @string
(escape_sequence) @string.special
[(integer_scalar) (float_scalar)] @number
[(boolean_scalar) (null_scalar)] @constant.builtin
[(anchor_name) (alias_name)] @label
(tag) @type
"#;

pub const INI: &str = r#"
(section_name) @type
(setting_name) @property
(setting_value) @string
(comment) @comment
"#;
