//! Разбор текстового вывода `xinput list --short` и `xinput list-props`.

use crate::model::{Device, Prop};
use crate::trace_if_enabled;
use smallvec::SmallVec;
use tracing::warn;

/// Символы дерева, которыми xinput оформляет иерархию устройств
const TREE_GLYPHS: &[char] = &['⎡', '⎜', '⎣', '↳', '∼', '~'];

/// Разобрать вывод `xinput list --short`. Нераспознанные строки пропускаются
pub fn parse_device_list(output: &str) -> Vec<Device> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let device = parse_device_line(line);
            if device.is_none() {
                warn!("Пропущена нераспознанная строка списка устройств: {:?}", line);
            }
            device
        })
        .collect()
}

fn parse_device_line(line: &str) -> Option<Device> {
    let id_pos = line.rfind("\tid=").or_else(|| line.rfind(" id="))?;
    let (head, tail) = line.split_at(id_pos);

    let name = head
        .trim_matches(|c: char| c.is_whitespace() || TREE_GLYPHS.contains(&c))
        .to_string();
    if name.is_empty() {
        return None;
    }

    let tail = &tail[4..];
    let digits_end = tail
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(tail.len());
    let id: u32 = tail[..digits_end].parse().ok()?;

    let rest = &tail[digits_end..];
    let kind = match (rest.find('['), rest.rfind(']')) {
        (Some(open), Some(close)) if open < close => normalize_kind(&rest[open + 1..close]),
        _ => String::new(),
    };

    trace_if_enabled!("Устройство: id={} name={:?} kind={:?}", id, name, kind);
    Some(Device { id, name, kind })
}

/// `slave  pointer  (2)` -> `slave pointer`
fn normalize_kind(raw: &str) -> String {
    let without_parent = match raw.rfind('(') {
        Some(pos) if raw.trim_end().ends_with(')') => &raw[..pos],
        _ => raw,
    };
    without_parent.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Разобрать вывод `xinput list-props <id>`. Строка заголовка `Device '...':` пропускается
pub fn parse_prop_list(output: &str) -> Vec<Prop> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !line.starts_with("Device '"))
        .filter_map(|line| {
            let prop = parse_prop_line(line);
            if prop.is_none() {
                warn!("Пропущена нераспознанная строка свойств: {:?}", line);
            }
            prop
        })
        .collect()
}

fn parse_prop_line(line: &str) -> Option<Prop> {
    let line = line.trim();

    // Первое вхождение "(<цифры>):" отделяет имя от значения; имя само может содержать скобки
    for (close, _) in line.match_indices("):") {
        let Some(open) = line[..close].rfind('(') else {
            continue;
        };
        let id_str = &line[open + 1..close];
        if id_str.is_empty() || !id_str.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }

        let id: u32 = id_str.parse().ok()?;
        let name = line[..open].trim().to_string();
        let value = line[close + 2..].trim().to_string();

        trace_if_enabled!("Свойство: id={} name={:?} value={:?}", id, name, value);
        return Some(Prop { id, name, value });
    }

    None
}

/// Разбить значение на аргументы `xinput set-prop`: список через запятые или пробелы.
///
/// Строка в двойных кавычках остаётся одним аргументом без кавычек, как её выводит
/// `list-props` для свойств типа STRING.
pub fn split_value(value: &str) -> SmallVec<[String; 4]> {
    let mut tokens = SmallVec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut had_quotes = false;

    for c in value.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                had_quotes = true;
            }
            c if !quoted && (c == ',' || c.is_whitespace()) => {
                if !current.is_empty() || had_quotes {
                    tokens.push(std::mem::take(&mut current));
                }
                had_quotes = false;
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() || had_quotes {
        tokens.push(current);
    }

    if quoted {
        warn!("Незакрытая кавычка в значении {:?}", value);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_SHORT: &str = "\
⎡ Virtual core pointer                    \tid=2\t[master pointer  (3)]
⎜   ↳ Virtual core XTEST pointer              \tid=4\t[slave  pointer  (2)]
⎜   ↳ SynPS/2 Synaptics TouchPad              \tid=12\t[slave  pointer  (2)]
⎣ Virtual core keyboard                   \tid=3\t[master keyboard (2)]
    ↳ AT Translated Set 2 keyboard            \tid=11\t[slave  keyboard (3)]
∼ Wacom Intuos Pen                          \tid=15\t[floating slave]
";

    const LIST_PROPS: &str = "\
Device 'SynPS/2 Synaptics TouchPad':
\tDevice Enabled (142):\t1
\tCoordinate Transformation Matrix (144):\t1.000000, 0.000000, 0.000000, 0.000000, 1.000000, 0.000000, 0.000000, 0.000000, 1.000000
\tlibinput Accel Speed (283):\t0.000000
\tDevice Node (266):\t\"/dev/input/event6\"
\tlibinput Click Methods Available (287):\t1, 1
\tDevice Product ID (267):\t2, 7
";

    #[test]
    fn test_parse_device_list() {
        let devices = parse_device_list(LIST_SHORT);

        let ids: Vec<u32> = devices.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 4, 12, 3, 11, 15]);

        assert_eq!(devices[0], Device::new(2, "Virtual core pointer", "master pointer"));
        assert_eq!(devices[2], Device::new(12, "SynPS/2 Synaptics TouchPad", "slave pointer"));
        assert_eq!(devices[4].kind, "slave keyboard");
        assert_eq!(devices[5], Device::new(15, "Wacom Intuos Pen", "floating slave"));
    }

    #[test]
    fn test_parse_device_list_skips_garbage() {
        let devices = parse_device_list("warning: something odd\n\n⎡ Mouse\tid=7\t[slave  pointer  (2)]\n");
        assert_eq!(devices, vec![Device::new(7, "Mouse", "slave pointer")]);
    }

    #[test]
    fn test_parse_prop_list() {
        let props = parse_prop_list(LIST_PROPS);

        assert_eq!(props.len(), 6);
        assert_eq!(props[0], Prop::new(142, "Device Enabled", "1"));
        assert!(props[1].value.starts_with("1.000000, 0.000000"));
        assert_eq!(props[2], Prop::new(283, "libinput Accel Speed", "0.000000"));
        assert_eq!(props[3].value, "\"/dev/input/event6\"");
        assert_eq!(props[5], Prop::new(267, "Device Product ID", "2, 7"));
    }

    #[test]
    fn test_parse_prop_with_parentheses_in_name_and_empty_value() {
        let props = parse_prop_list("\tEvdev Axis Inversion (abs) (301):\t0, 0\n\tEmpty Prop (302):\n");

        assert_eq!(props[0], Prop::new(301, "Evdev Axis Inversion (abs)", "0, 0"));
        assert_eq!(props[1], Prop::new(302, "Empty Prop", ""));
    }

    #[test]
    fn test_split_value() {
        assert_eq!(split_value("2.0").as_slice(), ["2.0"]);
        assert_eq!(split_value("1, 0").as_slice(), ["1", "0"]);
        assert_eq!(split_value(" 1  0 ,1 ").as_slice(), ["1", "0", "1"]);
        assert!(split_value("  ").is_empty());
    }

    #[test]
    fn test_split_value_keeps_quoted_string() {
        assert_eq!(split_value("\"my string value\"").as_slice(), ["my string value"]);
        assert_eq!(split_value("\"/dev/input/event6\"").as_slice(), ["/dev/input/event6"]);
        assert_eq!(split_value("\"a, b\", \"c\"").as_slice(), ["a, b", "c"]);
        assert_eq!(split_value("\"\"").as_slice(), [""]);
    }
}
