//! XML-RPC value tree plus entity-safe XML rendering.

// self
use crate::_prelude::*;

/// A single XML-RPC value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
	/// `<int>` or its `<i4>` alias.
	Int(i64),
	/// `<boolean>`.
	Bool(bool),
	/// `<string>`, or bare `<value>` text.
	Str(String),
	/// `<double>`.
	Double(f64),
	/// `<array>`.
	Array(Vec<Value>),
	/// `<struct>`.
	Struct(BTreeMap<String, Value>),
	/// `<nil/>` extension.
	Nil,
}
impl Value {
	/// Returns the integer payload, if this value is an integer.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string payload, if this value is a string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the element slice, if this value is an array.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the member map, if this value is a struct.
	pub fn as_struct(&self) -> Option<&BTreeMap<String, Value>> {
		match self {
			Self::Struct(v) => Some(v),
			_ => None,
		}
	}

	/// Renders the value as an XML-RPC `<value>` element.
	pub(crate) fn write_xml(&self, out: &mut String) {
		match self {
			Self::Int(v) => {
				out.push_str("<value><int>");
				out.push_str(&v.to_string());
				out.push_str("</int></value>");
			},
			Self::Bool(v) => {
				out.push_str("<value><boolean>");
				out.push_str(if *v { "1" } else { "0" });
				out.push_str("</boolean></value>");
			},
			Self::Str(v) => {
				out.push_str("<value><string>");
				escape_xml(v, out);
				out.push_str("</string></value>");
			},
			Self::Double(v) => {
				out.push_str("<value><double>");
				out.push_str(&v.to_string());
				out.push_str("</double></value>");
			},
			Self::Array(items) => {
				out.push_str("<value><array><data>");
				for item in items {
					item.write_xml(out);
				}
				out.push_str("</data></array></value>");
			},
			Self::Struct(members) => {
				out.push_str("<value><struct>");
				for (name, value) in members {
					out.push_str("<member><name>");
					escape_xml(name, out);
					out.push_str("</name>");
					value.write_xml(out);
					out.push_str("</member>");
				}
				out.push_str("</struct></value>");
			},
			Self::Nil => out.push_str("<value><nil/></value>"),
		}
	}
}
impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}
impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}
impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Str(value.to_owned())
	}
}
impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}
impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Self::Array(value)
	}
}

/// Escapes markup-significant characters into entity references.
pub(crate) fn escape_xml(text: &str, out: &mut String) {
	for ch in text.chars() {
		match ch {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			_ => out.push(ch),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn render(value: &Value) -> String {
		let mut out = String::new();

		value.write_xml(&mut out);

		out
	}

	#[test]
	fn scalars_render_with_type_elements() {
		assert_eq!(render(&Value::Int(-7)), "<value><int>-7</int></value>");
		assert_eq!(render(&Value::Bool(true)), "<value><boolean>1</boolean></value>");
		assert_eq!(render(&Value::from("slice")), "<value><string>slice</string></value>");
		assert_eq!(render(&Value::Nil), "<value><nil/></value>");
	}

	#[test]
	fn markup_characters_are_escaped() {
		let rendered = render(&Value::from("a<b & \"c\""));

		assert_eq!(rendered, "<value><string>a&lt;b &amp; &quot;c&quot;</string></value>");
	}

	#[test]
	fn nested_containers_render_in_order() {
		let members = BTreeMap::from_iter([
			("expires".to_owned(), Value::Int(1_000)),
			("name".to_owned(), Value::from("myslice")),
		]);
		let rendered = render(&Value::Array(vec![Value::Struct(members)]));

		assert_eq!(
			rendered,
			"<value><array><data><value><struct>\
			<member><name>expires</name><value><int>1000</int></value></member>\
			<member><name>name</name><value><string>myslice</string></value></member>\
			</struct></value></data></array></value>",
		);
	}
}
