use super::{Dictionary, Document, Element, I18nError, LANGUAGE_KEY, Lang, LanguageStore};
use tracing::debug;

/// Marker attribute naming the dictionary key of an element.
pub const I18N_ATTRIBUTE: &str = "data-i18n";

/// Id of the element that shows the language a toggle would switch to.
pub const LANG_TOGGLE_ID: &str = "langText";

/// Applies one language to documents and remembers the choice.
#[derive(Debug)]
pub struct Translator<S: LanguageStore> {
    dictionary: Dictionary,
    store: S,
    current: Lang,
}

impl<S: LanguageStore> Translator<S> {
    /// Start in the stored language, or [`Lang::default`] when none is
    /// stored or the stored code is not supported.
    pub fn new(dictionary: Dictionary, store: S) -> Self {
        let current = store
            .get(LANGUAGE_KEY)
            .and_then(|code| code.parse().ok())
            .unwrap_or_default();
        Self {
            dictionary,
            store,
            current,
        }
    }

    pub fn current(&self) -> Lang {
        self.current
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.dictionary.translate(self.current.code(), key)
    }

    /// Translate every marked element of `doc`, update the toggle label,
    /// and persist the current language.
    ///
    /// Returns how many elements were rewritten.
    pub fn apply<D: Document>(&mut self, doc: &mut D) -> Result<usize, I18nError> {
        let lang = self.current.code();
        let mut count = 0;
        for element in doc.elements_with_attribute(I18N_ATTRIBUTE) {
            let Some(key) = element.attribute(I18N_ATTRIBUTE).map(str::to_string) else {
                continue;
            };
            let text = self.dictionary.translate(lang, &key);
            write_translation(element, text);
            count += 1;
        }

        if let Some(label) = doc.element_by_id(LANG_TOGGLE_ID) {
            label.set_text_content(&self.current.toggle().code().to_uppercase());
        }

        self.store.set(LANGUAGE_KEY, lang)?;
        debug!(lang, count, "applied translations");
        Ok(count)
    }

    /// Switch to `lang` and re-apply.
    pub fn set_language<D: Document>(&mut self, lang: Lang, doc: &mut D) -> Result<usize, I18nError> {
        self.current = lang;
        self.apply(doc)
    }

    /// Switch to the other language and re-apply. Returns the new language.
    pub fn toggle<D: Document>(&mut self, doc: &mut D) -> Result<Lang, I18nError> {
        self.set_language(self.current.toggle(), doc)?;
        Ok(self.current)
    }
}

/// Text inputs and textareas get a placeholder, buttons keep nested markup
/// such as icons, everything else gets plain text.
fn write_translation<E: Element>(element: &mut E, text: &str) {
    let tag = element.tag_name();
    if tag.eq_ignore_ascii_case("input") {
        // The `type` attribute defaults to text.
        let is_text = element
            .attribute("type")
            .is_none_or(|t| t.eq_ignore_ascii_case("text"));
        if is_text {
            element.set_attribute("placeholder", text);
        } else {
            element.set_text_content(text);
        }
    } else if tag.eq_ignore_ascii_case("textarea") {
        element.set_attribute("placeholder", text);
    } else if tag.eq_ignore_ascii_case("button") {
        element.set_inner_html(text);
    } else {
        element.set_text_content(text);
    }
}
