//! `models.go`: one struct (or alias) per document, followed by the decoders.

use ir::Namespace;

use crate::generators::{decoder, doc_comment, import_type, member_order, struct_member};
use crate::go_ast::{GoDecl, GoFile};
use crate::{ArtifactGenerator, GoSettings, Result};

/// Generates model types and their `UnmarshalJSON` methods.
pub struct ModelsGenerator;

impl ArtifactGenerator for ModelsGenerator {
    fn file_name(&self) -> &'static str { "models.go" }

    fn generate(&self, namespace: &Namespace, settings: &GoSettings) -> Result<Option<GoFile>> {
        if namespace.documents.is_empty() {
            return Ok(None);
        }

        let mut file = GoFile::new(&namespace.api);
        let mut decoders = Vec::new();

        for doc in &namespace.documents {
            let comment = doc_comment::line_comment(doc.description.as_deref(), settings.comment_width);
            match &doc.non_struct_alias {
                Some(alias) => file.push(GoDecl::Type {
                    doc: comment,
                    name: doc.model_name.clone(),
                    underlying: alias.clone(),
                }),
                None => {
                    let fields = member_order(&doc.fields)
                        .into_iter()
                        .map(|field| {
                            import_type(&field.go_type, &settings.imports, &mut file);
                            struct_member(field, field.go_type.value_rendering(), settings.comment_width)
                        })
                        .collect();
                    file.push(GoDecl::Struct { doc: comment, name: doc.model_name.clone(), fields });
                }
            }

            if let Some(decl) = decoder::document_decoder(doc, settings)? {
                if doc.custom_decoder.is_none() {
                    file.import(settings.imports.serial.clone());
                }
                if decoder::uses_json(doc) {
                    file.import("encoding/json");
                }
                decoders.push(decl);
            }
        }

        file.decls.extend(decoders);
        Ok(Some(file))
    }
}
