use std::borrow::Cow;

/// Marker that introduced a bullet point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletMarker {
    /// `+ `
    Plus,
    /// `* `
    Star,
}

impl BulletMarker {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(BulletMarker::Plus),
            '*' => Some(BulletMarker::Star),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BulletMarker::Plus => "+ ",
            BulletMarker::Star => "* ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Text,
    Quote,
    CodeBlock,
    BulletPoint,
}

/// How deep bullet points nest before further markers are kept as text.
pub const MAX_BULLET_DEPTH: usize = 64;

/// A node of the parse tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Text(String),
    /// Quote paragraph, without the `> ` prefix but with its line break
    Quote(String),
    /// Inline code, without the surrounding backticks
    CodeBlock(String),
    /// Bullet paragraph. `children` is the paragraph after the marker,
    /// parsed again for inline code and nested bullets.
    BulletPoint {
        marker: BulletMarker,
        children: Vec<Element>,
    },
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Text(_) => ElementKind::Text,
            Element::Quote(_) => ElementKind::Quote,
            Element::CodeBlock(_) => ElementKind::CodeBlock,
            Element::BulletPoint { .. } => ElementKind::BulletPoint,
        }
    }

    /// Text of the element without its own markup. A bullet's text is
    /// rebuilt from its children.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Element::Text(text) | Element::Quote(text) | Element::CodeBlock(text) => {
                Cow::Borrowed(text.as_str())
            }
            Element::BulletPoint { children, .. } => {
                let mut out = String::new();
                for child in children {
                    child.write_source(&mut out);
                }
                Cow::Owned(out)
            }
        }
    }

    pub fn children(&self) -> &[Element] {
        match self {
            Element::BulletPoint { children, .. } => children,
            _ => &[],
        }
    }

    /// Number of bullet points on the deepest path through this element.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];
        while let Some((element, depth)) = stack.pop() {
            if let Element::BulletPoint { children, .. } = element {
                deepest = deepest.max(depth + 1);
                stack.extend(children.iter().map(|child| (child, depth + 1)));
            }
        }
        deepest
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    fn write_source(&self, out: &mut String) {
        match self {
            Element::Text(text) => out.push_str(text),
            Element::Quote(text) => {
                out.push_str("> ");
                out.push_str(text);
            }
            Element::CodeBlock(text) => {
                out.push('`');
                out.push_str(text);
                out.push('`');
            }
            Element::BulletPoint { marker, children } => {
                out.push_str(marker.as_str());
                for child in children {
                    child.write_source(out);
                }
            }
        }
    }
}

/// Ordered top-level elements of a parsed document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextMarkdown {
    elements: Vec<Element>,
}

impl TextMarkdown {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Leaf elements in document order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            stack: vec![self.elements.iter()],
        }
    }

    /// Concatenated text of all leaves. This is the text a renderer shows.
    pub fn plain_text(&self) -> String {
        self.leaves().map(|leaf| leaf.text()).collect()
    }

    /// Rebuild the markdown the tree was parsed from, markers included.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        for element in &self.elements {
            element.write_source(&mut out);
        }
        out
    }
}

/// Depth-first iterator over leaf elements
pub struct Leaves<'a> {
    stack: Vec<std::slice::Iter<'a, Element>>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let iter = self.stack.last_mut()?;
            match iter.next() {
                Some(element) if element.is_leaf() => return Some(element),
                Some(element) => self.stack.push(element.children().iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
