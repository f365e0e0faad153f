use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Текстовое поле, участвующее в поиске
pub struct SearchField<T> {
    pub name: &'static str,
    pub value: fn(&T) -> &str,
}

/// Дискретное поле, предлагаемое как фильтр (категория, бренд, статус)
pub struct Facet<T> {
    pub name: &'static str,
    pub label: &'static str,
    pub value: fn(&T) -> &str,
}

/// Числовое поле с фильтром по диапазону
pub struct RangeField<T> {
    pub name: &'static str,
    pub value: fn(&T) -> f64,
}

/// Ключ сортировки и его компаратор
pub struct SortSpec<T> {
    pub key: &'static str,
    pub label: &'static str,
    pub compare: fn(&T, &T) -> Ordering,
}

/// Поле, которое не может быть пустым после trim
pub struct RequiredField<T> {
    pub name: &'static str,
    pub message: &'static str,
    pub value: fn(&T) -> &str,
}

/// Описание сущности для универсального списка
///
/// Один экземпляр на тип сущности; страницы списков отличаются только им.
pub struct EntityConfig<T> {
    pub search: Vec<SearchField<T>>,
    pub facets: Vec<Facet<T>>,
    pub range: Option<RangeField<T>>,
    pub sorts: Vec<SortSpec<T>>,
    /// Ключ сортировки по умолчанию
    pub natural_sort: &'static str,
    pub required: Vec<RequiredField<T>>,
}

impl<T> EntityConfig<T> {
    pub fn new(natural_sort: &'static str) -> Self {
        Self {
            search: Vec::new(),
            facets: Vec::new(),
            range: None,
            sorts: Vec::new(),
            natural_sort,
            required: Vec::new(),
        }
    }

    pub fn with_search(mut self, name: &'static str, value: fn(&T) -> &str) -> Self {
        self.search.push(SearchField { name, value });
        self
    }

    pub fn with_facet(
        mut self,
        name: &'static str,
        label: &'static str,
        value: fn(&T) -> &str,
    ) -> Self {
        self.facets.push(Facet { name, label, value });
        self
    }

    pub fn with_range(mut self, name: &'static str, value: fn(&T) -> f64) -> Self {
        self.range = Some(RangeField { name, value });
        self
    }

    pub fn with_sort(
        mut self,
        key: &'static str,
        label: &'static str,
        compare: fn(&T, &T) -> Ordering,
    ) -> Self {
        self.sorts.push(SortSpec {
            key,
            label,
            compare,
        });
        self
    }

    pub fn with_required(
        mut self,
        name: &'static str,
        message: &'static str,
        value: fn(&T) -> &str,
    ) -> Self {
        self.required.push(RequiredField {
            name,
            message,
            value,
        });
        self
    }

    pub fn find_facet(&self, name: &str) -> Option<&Facet<T>> {
        self.facets.iter().find(|f| f.name == name)
    }

    pub fn find_sort(&self, key: &str) -> Option<&SortSpec<T>> {
        self.sorts.iter().find(|s| s.key == key)
    }

    /// Пары (ключ, подпись) для выпадающего списка сортировки
    pub fn sort_options(&self) -> Vec<(&'static str, &'static str)> {
        self.sorts.iter().map(|s| (s.key, s.label)).collect()
    }
}

/// Первичный ключ сортировки: NFD без диакритики, đ -> d, нижний регистр
fn collation_key(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' | 'Đ' => 'd',
            _ => c,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Сравнение строк для сортировки по имени с учетом языка:
/// сначала по базовым буквам, затем по регистронезависимому тексту
/// с диакритикой, затем по исходному тексту
pub fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_text_ignores_case() {
        assert_eq!(compare_text("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_text("Laptop", "laptop"), Ordering::Less);
        assert_eq!(compare_text("Tablet", "Tablet"), Ordering::Equal);
    }

    #[test]
    fn test_compare_text_vietnamese_letters() {
        let mut names = vec!["Laptop", "Tablet", "Điện thoại", "Ốp lưng", "Pin"];
        names.sort_by(|a, b| compare_text(a, b));
        assert_eq!(names, vec!["Điện thoại", "Laptop", "Ốp lưng", "Pin", "Tablet"]);

        assert_eq!(compare_text("Ưu đãi", "Zalo"), Ordering::Less);
        assert_eq!(compare_text("do", "đo"), Ordering::Less);
    }

    #[test]
    fn test_lookup_by_name() {
        let config: EntityConfig<String> = EntityConfig::new("name-asc")
            .with_facet("first", "Первая буква", |s: &String| &s[..1])
            .with_sort("name-asc", "По имени", |a: &String, b: &String| compare_text(a, b));

        assert!(config.find_facet("first").is_some());
        assert!(config.find_facet("missing").is_none());
        assert_eq!(config.sort_options(), vec![("name-asc", "По имени")]);
    }
}
