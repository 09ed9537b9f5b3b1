//! XML-RPC envelope encoding and decoding.

// self
use crate::{
	_prelude::*,
	rpc::value::{Value, escape_xml},
};

/// Fault carried by a `<fault>` response envelope.
#[derive(Clone, Debug, PartialEq, ThisError)]
#[error("Server fault {code}: {message}")]
pub struct Fault {
	/// Numeric `faultCode` reported by the server.
	pub code: i64,
	/// Human-readable `faultString` reported by the server.
	pub message: String,
}

/// Malformed-envelope failures raised while decoding a response.
#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum ProtocolError {
	/// The response ended before the envelope was complete.
	#[error("Response ended unexpectedly while looking for {expected}.")]
	UnexpectedEnd {
		/// Description of the markup that was expected next.
		expected: &'static str,
	},
	/// Markup other than the expected element appeared.
	#[error("Expected {expected}, found `{found}`.")]
	UnexpectedTag {
		/// Description of the markup that was expected next.
		expected: &'static str,
		/// Markup that actually appeared.
		found: String,
	},
	/// A scalar payload could not be parsed.
	#[error("Invalid `{kind}` payload `{payload}`.")]
	InvalidScalar {
		/// Scalar element the payload belonged to.
		kind: &'static str,
		/// Offending character data.
		payload: String,
	},
	/// A character entity could not be decoded.
	#[error("Invalid character entity `&{entity};`.")]
	InvalidEntity {
		/// Entity body between `&` and `;`.
		entity: String,
	},
	/// A required struct member was absent.
	#[error("Response struct is missing the `{name}` member.")]
	MissingMember {
		/// Name of the absent member.
		name: &'static str,
	},
	/// A value held a different type than the call contract expects.
	#[error("Response value `{name}` has an unexpected type.")]
	UnexpectedType {
		/// Name of the offending value or member.
		name: &'static str,
	},
}

/// Failure decoding a response envelope: either malformed XML or a fault.
#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum DecodeError {
	/// The envelope could not be parsed.
	#[error(transparent)]
	Protocol(#[from] ProtocolError),
	/// The envelope carried a `<fault>`.
	#[error(transparent)]
	Fault(#[from] Fault),
}

/// Encodes a positional-parameter `<methodCall>` envelope for `method`.
pub fn encode_request(method: &str, params: &[Value]) -> String {
	let mut out = String::with_capacity(256);

	out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
	out.push_str("<methodCall><methodName>");
	escape_xml(method, &mut out);
	out.push_str("</methodName><params>");
	for param in params {
		out.push_str("<param>");
		param.write_xml(&mut out);
		out.push_str("</param>");
	}
	out.push_str("</params></methodCall>");

	out
}

/// Decodes a `<methodResponse>` envelope into its single result value.
///
/// A `<fault>` envelope decodes into [`DecodeError::Fault`] so callers treat
/// server faults as errors without inspecting the value themselves.
pub fn decode_response(body: &str) -> Result<Value, DecodeError> {
	let mut reader = Reader::new(body);

	reader.expect_open("methodResponse")?;
	match reader.next_tag("`<params>` or `<fault>`")? {
		Tag::Open("params") => {
			reader.expect_open("param")?;

			let value = reader.parse_value()?;

			reader.expect_close("param")?;
			reader.expect_close("params")?;
			reader.expect_close("methodResponse")?;

			Ok(value)
		},
		Tag::Open("fault") => {
			let value = reader.parse_value()?;

			reader.expect_close("fault")?;
			reader.expect_close("methodResponse")?;

			Err(fault_from_value(&value)?.into())
		},
		tag => Err(ProtocolError::UnexpectedTag {
			expected: "`<params>` or `<fault>`",
			found: tag.label(),
		}
		.into()),
	}
}

fn fault_from_value(value: &Value) -> Result<Fault, ProtocolError> {
	let members = value.as_struct().ok_or(ProtocolError::UnexpectedType { name: "fault" })?;
	let code = members
		.get("faultCode")
		.and_then(Value::as_i64)
		.ok_or(ProtocolError::MissingMember { name: "faultCode" })?;
	let message = members
		.get("faultString")
		.and_then(Value::as_str)
		.ok_or(ProtocolError::MissingMember { name: "faultString" })?
		.to_owned();

	Ok(Fault { code, message })
}

#[derive(Clone, Debug, PartialEq)]
enum Tag<'a> {
	Open(&'a str),
	Close(&'a str),
	Empty(&'a str),
}
impl Tag<'_> {
	fn label(&self) -> String {
		match self {
			Self::Open(name) => format!("<{name}>"),
			Self::Close(name) => format!("</{name}>"),
			Self::Empty(name) => format!("<{name}/>"),
		}
	}
}

/// Cursor over the response text; markup only, no DTD or namespace support.
struct Reader<'a> {
	input: &'a str,
	pos: usize,
}
impl<'a> Reader<'a> {
	fn new(input: &'a str) -> Self {
		Self { input, pos: 0 }
	}

	fn rest(&self) -> &'a str {
		&self.input[self.pos..]
	}

	/// Skips whitespace, the XML declaration, and comments.
	fn skip_insignificant(&mut self) {
		loop {
			let rest = self.rest();
			let trimmed = rest.trim_start();

			self.pos += rest.len() - trimmed.len();

			if let Some(after) = self.rest().strip_prefix("<?") {
				match after.find("?>") {
					Some(end) => self.pos += 2 + end + 2,
					None => {
						self.pos = self.input.len();

						return;
					},
				}
			} else if let Some(after) = self.rest().strip_prefix("<!--") {
				match after.find("-->") {
					Some(end) => self.pos += 4 + end + 3,
					None => {
						self.pos = self.input.len();

						return;
					},
				}
			} else {
				return;
			}
		}
	}

	/// Reads the next markup tag, skipping insignificant content before it.
	fn next_tag(&mut self, expected: &'static str) -> Result<Tag<'a>, ProtocolError> {
		self.skip_insignificant();

		let rest = self.rest();

		if rest.is_empty() {
			return Err(ProtocolError::UnexpectedEnd { expected });
		}

		let Some(markup) = rest.strip_prefix('<') else {
			return Err(ProtocolError::UnexpectedTag { expected, found: snippet(rest) });
		};
		let Some(end) = markup.find('>') else {
			return Err(ProtocolError::UnexpectedEnd { expected });
		};
		let raw = &markup[..end];

		self.pos += 1 + end + 1;

		if let Some(name) = raw.strip_prefix('/') {
			Ok(Tag::Close(name.trim()))
		} else if let Some(body) = raw.strip_suffix('/') {
			Ok(Tag::Empty(tag_name(body)))
		} else {
			Ok(Tag::Open(tag_name(raw)))
		}
	}

	fn expect_open(&mut self, name: &'static str) -> Result<(), ProtocolError> {
		match self.next_tag(name)? {
			Tag::Open(found) if found == name => Ok(()),
			tag => Err(ProtocolError::UnexpectedTag { expected: name, found: tag.label() }),
		}
	}

	fn expect_close(&mut self, name: &'static str) -> Result<(), ProtocolError> {
		match self.next_tag(name)? {
			Tag::Close(found) if found == name => Ok(()),
			tag => Err(ProtocolError::UnexpectedTag { expected: name, found: tag.label() }),
		}
	}

	/// Reads character data up to the closing tag `name`, decoding entities.
	fn read_text(&mut self, name: &'static str) -> Result<String, ProtocolError> {
		let rest = self.rest();
		let end = rest.find('<').ok_or(ProtocolError::UnexpectedEnd { expected: name })?;
		let text = decode_entities(&rest[..end])?;

		self.pos += end;
		self.expect_close(name)?;

		Ok(text)
	}

	/// Parses one `<value>` element.
	fn parse_value(&mut self) -> Result<Value, ProtocolError> {
		match self.next_tag("value")? {
			Tag::Open("value") => (),
			Tag::Empty("value") => return Ok(Value::Str(String::new())),
			tag => return Err(ProtocolError::UnexpectedTag { expected: "value", found: tag.label() }),
		}

		// A `<value>` either wraps a typed element or is an implicit string.
		// Character data before the next tag decides which: whitespace alone
		// is taken as pretty-printing around a typed payload.
		let rest = self.rest();
		let next = rest.find('<').ok_or(ProtocolError::UnexpectedEnd { expected: "value" })?;
		let leading = &rest[..next];

		if rest[next..].starts_with("</value") || !leading.trim().is_empty() {
			let text = decode_entities(leading)?;

			self.pos += next;
			self.expect_close("value")?;

			return Ok(Value::Str(text));
		}

		self.pos += next;

		let value = match self.next_tag("an XML-RPC type element")? {
			Tag::Empty("nil") => Value::Nil,
			Tag::Empty("string") => Value::Str(String::new()),
			Tag::Open("int") => int_value(self.read_text("int")?, "int")?,
			Tag::Open("i4") => int_value(self.read_text("i4")?, "i4")?,
			Tag::Open("boolean") => bool_value(self.read_text("boolean")?)?,
			Tag::Open("string") => Value::Str(self.read_text("string")?),
			Tag::Open("double") => double_value(self.read_text("double")?)?,
			Tag::Open("array") => self.parse_array_body()?,
			Tag::Open("struct") => self.parse_struct_body()?,
			Tag::Open("nil") => {
				self.expect_close("nil")?;

				Value::Nil
			},
			tag => {
				return Err(ProtocolError::UnexpectedTag {
					expected: "an XML-RPC type element",
					found: tag.label(),
				});
			},
		};

		self.expect_close("value")?;

		Ok(value)
	}

	/// Parses `<data>(value)*</data></array>` after an opening `<array>`.
	fn parse_array_body(&mut self) -> Result<Value, ProtocolError> {
		let mut items = Vec::new();

		match self.next_tag("data")? {
			Tag::Empty("data") => {
				self.expect_close("array")?;

				return Ok(Value::Array(items));
			},
			Tag::Open("data") => (),
			tag => return Err(ProtocolError::UnexpectedTag { expected: "data", found: tag.label() }),
		}
		loop {
			self.skip_insignificant();

			if self.rest().starts_with("</") {
				self.expect_close("data")?;

				break;
			}

			items.push(self.parse_value()?);
		}
		self.expect_close("array")?;

		Ok(Value::Array(items))
	}

	/// Parses `(member)*</struct>` after an opening `<struct>`.
	fn parse_struct_body(&mut self) -> Result<Value, ProtocolError> {
		let mut members = BTreeMap::new();

		loop {
			self.skip_insignificant();

			if self.rest().starts_with("</") {
				self.expect_close("struct")?;

				break;
			}

			self.expect_open("member")?;
			self.expect_open("name")?;

			let name = self.read_text("name")?;
			let value = self.parse_value()?;

			self.expect_close("member")?;
			members.insert(name, value);
		}

		Ok(Value::Struct(members))
	}
}

fn tag_name(raw: &str) -> &str {
	raw.split_ascii_whitespace().next().unwrap_or("")
}

fn snippet(text: &str) -> String {
	text.chars().take(24).collect()
}

fn int_value(text: String, kind: &'static str) -> Result<Value, ProtocolError> {
	text.trim()
		.parse::<i64>()
		.map(Value::Int)
		.map_err(|_| ProtocolError::InvalidScalar { kind, payload: text })
}

fn bool_value(text: String) -> Result<Value, ProtocolError> {
	match text.trim() {
		"1" | "true" => Ok(Value::Bool(true)),
		"0" | "false" => Ok(Value::Bool(false)),
		_ => Err(ProtocolError::InvalidScalar { kind: "boolean", payload: text }),
	}
}

fn double_value(text: String) -> Result<Value, ProtocolError> {
	text.trim()
		.parse::<f64>()
		.map(Value::Double)
		.map_err(|_| ProtocolError::InvalidScalar { kind: "double", payload: text })
}

fn decode_entities(text: &str) -> Result<String, ProtocolError> {
	if !text.contains('&') {
		return Ok(text.to_owned());
	}

	let mut out = String::with_capacity(text.len());
	let mut rest = text;

	while let Some(amp) = rest.find('&') {
		out.push_str(&rest[..amp]);
		rest = &rest[amp + 1..];

		let semi =
			rest.find(';').ok_or_else(|| ProtocolError::InvalidEntity { entity: snippet(rest) })?;
		let entity = &rest[..semi];

		match entity {
			"amp" => out.push('&'),
			"lt" => out.push('<'),
			"gt" => out.push('>'),
			"quot" => out.push('"'),
			"apos" => out.push('\''),
			_ => {
				let code = if let Some(hex) =
					entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X"))
				{
					u32::from_str_radix(hex, 16).ok()
				} else if let Some(dec) = entity.strip_prefix('#') {
					dec.parse::<u32>().ok()
				} else {
					None
				};
				let ch = code
					.and_then(char::from_u32)
					.ok_or_else(|| ProtocolError::InvalidEntity { entity: entity.to_owned() })?;

				out.push(ch);
			},
		}

		rest = &rest[semi + 1..];
	}
	out.push_str(rest);

	Ok(out)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn requests_carry_positional_parameters() {
		let encoded = encode_request("GetSlices", &[Value::from("auth"), Value::Int(3)]);

		assert_eq!(
			encoded,
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
			<methodCall><methodName>GetSlices</methodName><params>\
			<param><value><string>auth</string></value></param>\
			<param><value><int>3</int></value></param>\
			</params></methodCall>",
		);
	}

	#[test]
	fn responses_decode_through_pretty_printing() {
		let body = "<?xml version=\"1.0\"?>\n<methodResponse>\n  <params>\n    <param>\n      \
			<value><array><data>\n        <value><struct>\n          \
			<member><name>name</name><value><string>myslice</string></value></member>\n          \
			<member><name>expires</name><value><i4>1000</i4></value></member>\n        \
			</struct></value>\n      </data></array></value>\n    </param>\n  </params>\n\
			</methodResponse>";
		let value = decode_response(body).expect("Pretty-printed response should decode.");
		let items = value.as_array().expect("Result should be an array.");
		let members = items[0].as_struct().expect("Element should be a struct.");

		assert_eq!(members.get("name"), Some(&Value::from("myslice")));
		assert_eq!(members.get("expires"), Some(&Value::Int(1_000)));
	}

	#[test]
	fn bare_value_text_is_an_implicit_string() {
		let body = "<methodResponse><params><param><value>plain &amp; simple</value></param>\
			</params></methodResponse>";
		let value = decode_response(body).expect("Implicit string response should decode.");

		assert_eq!(value, Value::from("plain & simple"));
	}

	#[test]
	fn numeric_entities_decode() {
		let body = "<methodResponse><params><param><value><string>&#65;&#x42;</string></value>\
			</param></params></methodResponse>";
		let value = decode_response(body).expect("Entity-bearing response should decode.");

		assert_eq!(value, Value::from("AB"));
	}

	#[test]
	fn empty_array_decodes() {
		let body = "<methodResponse><params><param><value><array><data/></array></value></param>\
			</params></methodResponse>";
		let value = decode_response(body).expect("Empty array response should decode.");

		assert_eq!(value, Value::Array(Vec::new()));
	}

	#[test]
	fn faults_decode_as_errors() {
		let body = "<methodResponse><fault><value><struct>\
			<member><name>faultCode</name><value><int>102</int></value></member>\
			<member><name>faultString</name><value><string>Bad auth</string></value></member>\
			</struct></value></fault></methodResponse>";
		let error = decode_response(body).expect_err("Fault envelope should decode as an error.");

		assert_eq!(error, DecodeError::Fault(Fault { code: 102, message: "Bad auth".to_owned() }));
	}

	#[test]
	fn truncated_envelopes_are_protocol_errors() {
		let body = "<methodResponse><params><param><value><int>1";
		let error = decode_response(body).expect_err("Truncated envelope should fail.");

		assert!(matches!(error, DecodeError::Protocol(ProtocolError::UnexpectedEnd { .. })));
	}

	#[test]
	fn invalid_scalars_are_protocol_errors() {
		let body = "<methodResponse><params><param><value><int>soon</int></value></param>\
			</params></methodResponse>";
		let error = decode_response(body).expect_err("Non-numeric int payload should fail.");

		assert!(matches!(
			error,
			DecodeError::Protocol(ProtocolError::InvalidScalar { kind: "int", .. }),
		));
	}
}
